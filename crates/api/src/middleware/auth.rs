//! # Authentication Module
//!
//! Password hashing for stored credentials and the [`AdminActor`]
//! extractor that resolves the administrator performing a request.
//!
//! New credentials are hashed with Argon2. Accounts carried over from the
//! legacy system may still hold plain-text passwords; those are compared
//! directly until they are re-hashed.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use campus_core::{errors::CampusError, models::account::Role};
use eyre::Result;
use tracing::warn;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Header carrying the acting administrator's account id.
pub const ADMIN_ACCOUNT_HEADER: &str = "x-admin-account";

/// Hashes a password using the Argon2 algorithm
///
/// # Returns
///
/// * `Result<String>` - The password in PHC string format (includes
///   algorithm, version, parameters, salt, and hash)
///
/// # Example
///
/// ```
/// use campus_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("user_password").unwrap();
/// assert!(verify_password(&hashed, "user_password"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `candidate` against a stored credential.
///
/// Stored values that are not Argon2 PHC strings are legacy plain-text
/// passwords and must match exactly.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    if !stored.starts_with("$argon2") {
        return stored == candidate;
    }

    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            warn!("Stored password hash could not be parsed: {}", err);
            false
        }
    }
}

/// The administrator performing the current request.
///
/// Rejects with 401 when the `X-Admin-Account` header is missing or not a
/// UUID, and with 403 when it names an unknown or non-admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminActor(pub Uuid);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(ADMIN_ACCOUNT_HEADER).ok_or_else(|| {
            CampusError::Authentication("X-Admin-Account header is required".to_string())
        })?;

        let account_id = header
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or_else(|| {
                CampusError::Authentication("X-Admin-Account must be an account id".to_string())
            })?;

        match state.accounts.find_account_by_id(account_id).await? {
            Some(account) if account.role == Role::Admin => Ok(AdminActor(account.id)),
            _ => {
                warn!(account_id = %account_id, "Admin action attempted by non-admin account");
                Err(CampusError::Authorization(format!(
                    "Account {account_id} is not an administrator"
                ))
                .into())
            }
        }
    }
}
