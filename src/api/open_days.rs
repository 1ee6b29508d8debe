//! Open day calendar endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::open_day::{CreateOpenDay, OpenDay},
};

/// List open days in date order
#[utoipa::path(
    get,
    path = "/open-days",
    tag = "open-days",
    responses(
        (status = 200, description = "Open days", body = Vec<OpenDay>)
    )
)]
pub async fn list_open_days(State(state): State<crate::AppState>) -> AppResult<Json<Vec<OpenDay>>> {
    let days = state.services.open_days.list().await?;
    Ok(Json(days))
}

/// Get an open day
#[utoipa::path(
    get,
    path = "/open-days/{date}",
    tag = "open-days",
    params(("date" = String, Path, description = "Date (YYYY-MM-DD)")),
    responses(
        (status = 200, description = "Open day", body = OpenDay),
        (status = 404, description = "Not an open day")
    )
)]
pub async fn get_open_day(
    State(state): State<crate::AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<OpenDay>> {
    let day = state.services.open_days.get(date).await?;
    Ok(Json(day))
}

/// Add an open day
#[utoipa::path(
    post,
    path = "/open-days",
    tag = "open-days",
    request_body = CreateOpenDay,
    responses(
        (status = 201, description = "Open day added", body = OpenDay),
        (status = 409, description = "Open day already exists")
    )
)]
pub async fn create_open_day(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateOpenDay>,
) -> AppResult<(StatusCode, Json<OpenDay>)> {
    let day = state.services.open_days.create(data.date).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

/// Remove an open day
#[utoipa::path(
    delete,
    path = "/open-days/{date}",
    tag = "open-days",
    params(("date" = String, Path, description = "Date (YYYY-MM-DD)")),
    responses(
        (status = 204, description = "Open day removed"),
        (status = 404, description = "Not an open day"),
        (status = 409, description = "Loans are due on this day")
    )
)]
pub async fn delete_open_day(
    State(state): State<crate::AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<StatusCode> {
    state.services.open_days.delete(date).await?;
    Ok(StatusCode::NO_CONTENT)
}
