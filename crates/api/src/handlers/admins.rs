use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_core::{
    errors::CampusError,
    models::account::{AdminListItem, CreateAdminRequest, NewAccount, Role},
    validation::optional,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::{self, AdminActor},
        error_handling::AppError,
    },
};

#[axum::debug_handler]
pub async fn list_admins(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AdminListItem>>, AppError> {
    let admins = state.accounts.list_accounts_by_role(Role::Admin).await?;
    Ok(Json(admins.into_iter().map(AdminListItem::from).collect()))
}

/// Creates an administrator. Anyone may create the first one; after that
/// the request must come from an existing administrator.
#[axum::debug_handler]
pub async fn create_admin(
    State(state): State<Arc<ApiState>>,
    actor: Result<AdminActor, AppError>,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminListItem>), AppError> {
    let bootstrap = state
        .accounts
        .list_accounts_by_role(Role::Admin)
        .await?
        .is_empty();
    let actor = match actor {
        Ok(AdminActor(actor)) => Some(actor),
        Err(_) if bootstrap => None,
        Err(rejection) => return Err(rejection),
    };
    payload.validate()?;

    let account = state
        .accounts
        .create_account(NewAccount {
            user_id: payload.user_id.trim().to_string(),
            password: auth::hash_password(&payload.password)?,
            role: Role::Admin,
            display_name: optional(Some(&payload.name)),
        })
        .await?;
    info!(user_id = %account.user_id, actor = ?actor, "Administrator created");

    Ok((StatusCode::CREATED, Json(account.into())))
}

#[axum::debug_handler]
pub async fn delete_admin(
    State(state): State<Arc<ApiState>>,
    AdminActor(actor): AdminActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.accounts.delete_account(id, Role::Admin).await? {
        return Err(CampusError::NotFound(format!("Administrator {id} not found")).into());
    }

    info!(account_id = %id, actor = %actor, "Administrator deleted");
    Ok(StatusCode::NO_CONTENT)
}
