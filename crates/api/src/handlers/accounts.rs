use axum::{Json, extract::State, http::StatusCode};
use campus_core::{
    errors::CampusError,
    models::account::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role},
    registration::{register_student, validate_registration},
    validation::require_all,
};
use std::sync::Arc;
use tracing::info;

use crate::{
    ApiState,
    middleware::{auth, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    // Reject bad input before paying for a hash
    validate_registration(&payload)?;
    let password = auth::hash_password(&payload.password)?;

    let response = register_student(
        state.accounts.as_ref(),
        state.students.as_ref(),
        &payload,
        password,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    require_all(&[
        ("userId", payload.user_id.as_str()),
        ("password", payload.password.as_str()),
    ])?;

    let account = state
        .accounts
        .find_account_by_user_id(payload.user_id.trim())
        .await?
        .filter(|account| auth::verify_password(&account.password, &payload.password))
        .ok_or_else(|| CampusError::Authentication("Invalid user ID or password".to_string()))?;

    let student = match account.role {
        Role::Student => state.students.find_student_by_account(account.id).await?,
        Role::Admin => None,
    };
    info!(user_id = %account.user_id, role = %account.role, "Login succeeded");

    Ok(Json(LoginResponse {
        acc_index: account.id,
        acc_user_id: account.user_id,
        role: account.role,
        stud_student_id: student.as_ref().map(|s| s.student_id.clone()),
        stud_first_name: student.as_ref().map(|s| s.first_name.clone()),
        stud_middle_initial: student.as_ref().and_then(|s| s.middle_initial.clone()),
        stud_last_name: student.as_ref().map(|s| s.last_name.clone()),
        stud_year_level: student.as_ref().map(|s| s.year_level),
        stud_course: student.map(|s| s.course),
    }))
}
