use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_core::{
    errors::CampusError,
    models::organizer::{Organizer, OrganizerRequest},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn organizer_not_found(id: Uuid) -> CampusError {
    CampusError::NotFound(format!("Organizer {id} not found"))
}

#[axum::debug_handler]
pub async fn list_organizers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Organizer>>, AppError> {
    Ok(Json(state.organizers.list_organizers().await?))
}

#[axum::debug_handler]
pub async fn get_organizer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Organizer>, AppError> {
    let organizer = state
        .organizers
        .find_organizer(id)
        .await?
        .ok_or_else(|| organizer_not_found(id))?;

    Ok(Json(organizer))
}

#[axum::debug_handler]
pub async fn create_organizer(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<OrganizerRequest>,
) -> Result<(StatusCode, Json<Organizer>), AppError> {
    let organizer = state.organizers.create_organizer(payload.validate()?).await?;
    Ok((StatusCode::CREATED, Json(organizer)))
}

#[axum::debug_handler]
pub async fn update_organizer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrganizerRequest>,
) -> Result<Json<Organizer>, AppError> {
    let changes = payload.validate()?;
    let organizer = state
        .organizers
        .update_organizer(id, changes)
        .await?
        .ok_or_else(|| organizer_not_found(id))?;

    Ok(Json(organizer))
}

#[axum::debug_handler]
pub async fn delete_organizer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.organizers.delete_organizer(id).await? {
        return Err(organizer_not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
