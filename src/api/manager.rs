//! Manager account endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::manager::{ManagerDto, UpdatePasswordQuery},
};

/// Get the manager account
#[utoipa::path(
    get,
    path = "/manager",
    tag = "manager",
    responses(
        (status = 200, description = "Manager account", body = ManagerDto),
        (status = 404, description = "Manager not initialized")
    )
)]
pub async fn get_manager(State(state): State<crate::AppState>) -> AppResult<Json<ManagerDto>> {
    let manager = state.services.manager.get_manager().await?;
    Ok(Json(manager))
}

/// Change the manager password
#[utoipa::path(
    put,
    path = "/manager",
    tag = "manager",
    params(UpdatePasswordQuery),
    responses(
        (status = 200, description = "Password updated", body = ManagerDto),
        (status = 400, description = "Incorrect or invalid password", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_password(
    State(state): State<crate::AppState>,
    Query(query): Query<UpdatePasswordQuery>,
) -> AppResult<Json<ManagerDto>> {
    let manager = state.services.manager.update_password(&query).await?;
    Ok(Json(manager))
}
