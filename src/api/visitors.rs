//! Visitor endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        loan::LoanDto,
        visitor::{CreateVisitor, UpdateBalance, Visitor},
    },
};

/// List visitors
#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    responses(
        (status = 200, description = "Visitor list", body = Vec<Visitor>)
    )
)]
pub async fn list_visitors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Visitor>>> {
    let visitors = state.services.visitors.list().await?;
    Ok(Json(visitors))
}

/// Get a visitor by username
#[utoipa::path(
    get,
    path = "/visitors/{username}",
    tag = "visitors",
    params(("username" = String, Path, description = "Visitor username")),
    responses(
        (status = 200, description = "Visitor details", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor(
    State(state): State<crate::AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.get(&username).await?;
    Ok(Json(visitor))
}

/// Register a visitor
#[utoipa::path(
    post,
    path = "/visitors",
    tag = "visitors",
    request_body = CreateVisitor,
    responses(
        (status = 201, description = "Visitor created", body = Visitor),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_visitor(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateVisitor>,
) -> AppResult<(StatusCode, Json<Visitor>)> {
    let visitor = state.services.visitors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

/// Set a visitor's outstanding balance
#[utoipa::path(
    put,
    path = "/visitors/{username}/balance",
    tag = "visitors",
    params(("username" = String, Path, description = "Visitor username")),
    request_body = UpdateBalance,
    responses(
        (status = 200, description = "Balance updated", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn update_balance(
    State(state): State<crate::AppState>,
    Path(username): Path<String>,
    Json(data): Json<UpdateBalance>,
) -> AppResult<Json<Visitor>> {
    let visitor = state
        .services
        .visitors
        .update_balance(&username, data.balance)
        .await?;
    Ok(Json(visitor))
}

/// Delete a visitor without loans
#[utoipa::path(
    delete,
    path = "/visitors/{username}",
    tag = "visitors",
    params(("username" = String, Path, description = "Visitor username")),
    responses(
        (status = 204, description = "Visitor deleted"),
        (status = 404, description = "Visitor not found"),
        (status = 409, description = "Visitor still has loans")
    )
)]
pub async fn delete_visitor(
    State(state): State<crate::AppState>,
    Path(username): Path<String>,
) -> AppResult<StatusCode> {
    state.services.visitors.delete(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Loans held by a visitor
#[utoipa::path(
    get,
    path = "/visitors/{username}/loans",
    tag = "visitors",
    params(("username" = String, Path, description = "Visitor username")),
    responses(
        (status = 200, description = "Visitor's loans", body = Vec<LoanDto>),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor_loans(
    State(state): State<crate::AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<LoanDto>>> {
    let loans = state.services.loans.get_loans_by_visitor(&username).await?;
    Ok(Json(loans))
}
