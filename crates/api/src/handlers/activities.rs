use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_core::{
    admission::student_not_found,
    errors::CampusError,
    models::{
        activity::{Activity, ActivityRequest, ActivityView, Decision, SUBMITTED_NOTIFY},
        status::ActivityStatus,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AdminActor, error_handling::AppError},
};

fn activity_not_found(id: Uuid) -> CampusError {
    CampusError::NotFound(format!("Activity {id} not found"))
}

#[axum::debug_handler]
pub async fn request_activity(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    let new_activity = payload.validate()?;

    if state
        .students
        .find_student_by_visible_id(&new_activity.student_id)
        .await?
        .is_none()
    {
        return Err(student_not_found(&new_activity.student_id).into());
    }
    if state
        .organizers
        .find_organizer(new_activity.organizer_id)
        .await?
        .is_none()
    {
        return Err(CampusError::NotFound(format!(
            "Organizer {} not found",
            new_activity.organizer_id
        ))
        .into());
    }

    let activity = state
        .activities
        .create_activity(new_activity, SUBMITTED_NOTIFY)
        .await?;
    info!(activity_id = %activity.id, student_id = %activity.student_id, "Activity requested");

    Ok((StatusCode::CREATED, Json(activity)))
}

#[axum::debug_handler]
pub async fn list_activities(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ActivityView>>, AppError> {
    Ok(Json(state.activities.list_activities().await?))
}

async fn decide(
    state: &ApiState,
    id: Uuid,
    decision: Decision,
    actor: Uuid,
) -> Result<Json<Activity>, AppError> {
    let activity = state
        .activities
        .decide_activity(id, decision.state(), actor, decision.notify_text())
        .await?
        .ok_or_else(|| activity_not_found(id))?;

    info!(activity_id = %id, status = %activity.status, actor = %actor, "Activity decided");
    Ok(Json(activity))
}

#[axum::debug_handler]
pub async fn approve_activity(
    State(state): State<Arc<ApiState>>,
    AdminActor(actor): AdminActor,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, AppError> {
    decide(&state, id, Decision::Approve, actor).await
}

#[axum::debug_handler]
pub async fn decline_activity(
    State(state): State<Arc<ApiState>>,
    AdminActor(actor): AdminActor,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, AppError> {
    decide(&state, id, Decision::Decline, actor).await
}

#[axum::debug_handler]
pub async fn activity_statuses(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ActivityStatus>>, AppError> {
    if state.activities.find_activity(id).await?.is_none() {
        return Err(activity_not_found(id).into());
    }
    Ok(Json(state.activities.list_activity_statuses(id).await?))
}
