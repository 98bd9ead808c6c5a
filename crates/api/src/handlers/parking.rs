use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_core::models::{
    reservation::{Parking, ParkingReservationRequest, ParkingStatusResponse, ParkingView},
    status::ParkingStatus,
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::AdminActor, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn reserve_parking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ParkingReservationRequest>,
) -> Result<(StatusCode, Json<Parking>), AppError> {
    let parking = state.reservations.reserve_parking(&payload).await?;
    Ok((StatusCode::CREATED, Json(parking)))
}

#[axum::debug_handler]
pub async fn parking_status(
    State(state): State<Arc<ApiState>>,
    Path(student_id): Path<String>,
) -> Result<Json<ParkingStatusResponse>, AppError> {
    let active = state.reservations.has_active_parking(&student_id).await?;
    Ok(Json(ParkingStatusResponse { active }))
}

#[axum::debug_handler]
pub async fn release_parking(
    State(state): State<Arc<ApiState>>,
    Path(student_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.reservations.release_parking(&student_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Admin removal of a spot's occupant, recorded against the admin account.
#[axum::debug_handler]
pub async fn release_parking_spot(
    State(state): State<Arc<ApiState>>,
    AdminActor(actor): AdminActor,
    Path(spot): Path<String>,
) -> Result<StatusCode, AppError> {
    state.reservations.release_parking_spot(&spot, actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_parking(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ParkingView>>, AppError> {
    Ok(Json(state.reservations.list_parking().await?))
}

#[axum::debug_handler]
pub async fn parking_history(
    State(state): State<Arc<ApiState>>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<ParkingStatus>>, AppError> {
    Ok(Json(state.reservations.parking_history(&student_id).await?))
}
