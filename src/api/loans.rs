//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::loan::{CreateLoanQuery, LoanDto, LoanQuery, UpdateStatusQuery},
};

/// List loans, optionally filtered by one criterion
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    params(LoanQuery),
    responses(
        (status = 200, description = "Matching loans", body = Vec<LoanDto>),
        (status = 400, description = "More than one filter given"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<Vec<LoanDto>>> {
    let loans = &state.services.loans;

    let result = match query {
        LoanQuery { status: None, due_date: None, submitted_date: None, username: None } => {
            loans.get_all_loans().await?
        }
        LoanQuery { status: Some(status), due_date: None, submitted_date: None, username: None } => {
            loans.get_loans_by_status(status).await?
        }
        LoanQuery { status: None, due_date: Some(date), submitted_date: None, username: None } => {
            loans.get_loans_by_due_date(date).await?
        }
        LoanQuery { status: None, due_date: None, submitted_date: Some(date), username: None } => {
            loans.get_loans_by_submitted_date(date).await?
        }
        LoanQuery { status: None, due_date: None, submitted_date: None, username: Some(username) } => {
            loans.get_loans_by_visitor(&username).await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "Only one of status, dueDate, submittedDate or username may be given".to_string(),
            ))
        }
    };

    Ok(Json(result))
}

/// Get a loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan details", body = LoanDto),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanDto>> {
    let loan = state.services.loans.get_loan(id).await?;
    Ok(Json(loan))
}

/// Request a loan of an artefact
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    params(CreateLoanQuery),
    responses(
        (status = 201, description = "Loan requested", body = LoanDto),
        (status = 400, description = "Visitor or artefact not eligible", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Query(query): Query<CreateLoanQuery>,
) -> AppResult<(StatusCode, Json<LoanDto>)> {
    let loan = state
        .services
        .loans
        .create_loan(query.artefact_id, &query.username)
        .await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Approve or decline a loan
#[utoipa::path(
    put,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID"),
        UpdateStatusQuery
    ),
    responses(
        (status = 200, description = "Loan approved", body = LoanDto),
        (status = 204, description = "Loan declined and removed"),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn update_loan_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<UpdateStatusQuery>,
) -> AppResult<Response> {
    let response = match state.services.loans.update_status(id, query.status).await? {
        Some(loan) => (StatusCode::OK, Json(loan)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

/// Delete a loan
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.loans.delete_loan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
