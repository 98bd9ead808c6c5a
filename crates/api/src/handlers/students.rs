use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_core::{
    admission::student_not_found,
    models::{account::Role, student::StudentListItem},
};
use std::sync::Arc;
use tracing::info;

use crate::{
    ApiState,
    middleware::{auth::AdminActor, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn list_students(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<StudentListItem>>, AppError> {
    Ok(Json(state.students.list_students().await?))
}

/// Deletes the student's account, which takes the profile, reservations
/// and activities with it.
#[axum::debug_handler]
pub async fn delete_student(
    State(state): State<Arc<ApiState>>,
    AdminActor(actor): AdminActor,
    Path(student_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let student = state
        .students
        .find_student_by_visible_id(&student_id)
        .await?
        .ok_or_else(|| student_not_found(&student_id))?;

    if !state
        .accounts
        .delete_account(student.account_id, Role::Student)
        .await?
    {
        return Err(student_not_found(&student_id).into());
    }

    info!(student_id = %student_id, actor = %actor, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}
