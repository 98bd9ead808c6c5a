use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_core::models::{
    reservation::{Locker, LockerReservationRequest, LockerView},
    status::LockerStatus,
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::AdminActor, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn reserve_locker(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LockerReservationRequest>,
) -> Result<(StatusCode, Json<Locker>), AppError> {
    let locker = state.reservations.reserve_locker(&payload).await?;
    Ok((StatusCode::CREATED, Json(locker)))
}

#[axum::debug_handler]
pub async fn list_lockers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<LockerView>>, AppError> {
    Ok(Json(state.reservations.list_lockers().await?))
}

#[axum::debug_handler]
pub async fn release_locker(
    State(state): State<Arc<ApiState>>,
    AdminActor(actor): AdminActor,
    Path(spot): Path<String>,
) -> Result<StatusCode, AppError> {
    state.reservations.release_locker(&spot, actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn locker_history(
    State(state): State<Arc<ApiState>>,
    Path(spot): Path<String>,
) -> Result<Json<Vec<LockerStatus>>, AppError> {
    Ok(Json(state.reservations.locker_history(&spot).await?))
}
