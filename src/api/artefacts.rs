//! Artefact endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::artefact::{Artefact, CreateArtefact, UpdateArtefact},
};

/// List all artefacts
#[utoipa::path(
    get,
    path = "/artefacts",
    tag = "artefacts",
    responses(
        (status = 200, description = "Artefact list", body = Vec<Artefact>)
    )
)]
pub async fn list_artefacts(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Artefact>>> {
    let artefacts = state.services.artefacts.list().await?;
    Ok(Json(artefacts))
}

/// Get artefact by ID
#[utoipa::path(
    get,
    path = "/artefacts/{id}",
    tag = "artefacts",
    params(("id" = i32, Path, description = "Artefact ID")),
    responses(
        (status = 200, description = "Artefact details", body = Artefact),
        (status = 404, description = "Artefact not found")
    )
)]
pub async fn get_artefact(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Artefact>> {
    let artefact = state.services.artefacts.get(id).await?;
    Ok(Json(artefact))
}

/// Create artefact
#[utoipa::path(
    post,
    path = "/artefacts",
    tag = "artefacts",
    request_body = CreateArtefact,
    responses(
        (status = 201, description = "Artefact created", body = Artefact)
    )
)]
pub async fn create_artefact(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateArtefact>,
) -> AppResult<(StatusCode, Json<Artefact>)> {
    let artefact = state.services.artefacts.create(&data).await?;
    Ok((StatusCode::CREATED, Json(artefact)))
}

/// Update artefact
#[utoipa::path(
    put,
    path = "/artefacts/{id}",
    tag = "artefacts",
    params(("id" = i32, Path, description = "Artefact ID")),
    request_body = UpdateArtefact,
    responses(
        (status = 200, description = "Artefact updated", body = Artefact),
        (status = 404, description = "Artefact not found")
    )
)]
pub async fn update_artefact(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateArtefact>,
) -> AppResult<Json<Artefact>> {
    let artefact = state.services.artefacts.update(id, &data).await?;
    Ok(Json(artefact))
}

/// Delete artefact
#[utoipa::path(
    delete,
    path = "/artefacts/{id}",
    tag = "artefacts",
    params(("id" = i32, Path, description = "Artefact ID")),
    responses(
        (status = 204, description = "Artefact deleted"),
        (status = 409, description = "Artefact is referenced by loans")
    )
)]
pub async fn delete_artefact(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.artefacts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
