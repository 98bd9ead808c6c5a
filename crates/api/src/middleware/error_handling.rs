//! # Error Handling Middleware
//!
//! Maps the domain's [`CampusError`] onto HTTP status codes and a JSON body
//! of the form `{"error": "<message>"}`, so every handler reports failures
//! the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_core::errors::CampusError;
use serde_json::json;

/// Body message for every 5xx response. The cause is only logged.
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use campus_api::middleware::error_handling::AppError;
/// use campus_core::errors::CampusError;
///
/// async fn handler(student_id: String) -> Result<Json<String>, AppError> {
///     if student_id.is_empty() {
///         return Err(AppError(CampusError::Validation("studentId is required".into())));
///     }
///     Ok(Json(student_id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CampusError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CampusError::NotFound(_) => StatusCode::NOT_FOUND,
            CampusError::Validation(_) => StatusCode::BAD_REQUEST,
            CampusError::Precondition(_) => StatusCode::BAD_REQUEST,
            CampusError::Conflict(_) => StatusCode::CONFLICT,
            CampusError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CampusError::Authorization(_) => StatusCode::FORBIDDEN,
            CampusError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CampusError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors to HTTP responses
///
/// Server-side failures are logged with their cause and answered with
/// [`SERVER_ERROR_MESSAGE`]. Client errors carry their own message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.0.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "Request rejected");
        }

        let message = if self.0.is_server_error() {
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.0.to_string()
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `CampusResult` inside handlers returning `Result<T, AppError>`.
impl From<CampusError> for AppError {
    fn from(err: CampusError) -> Self {
        AppError(err)
    }
}

/// Wraps an eyre report as a database error.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CampusError::Database(err))
    }
}

/// Maps a CampusError to an HTTP response
///
/// # Example
///
/// ```
/// use axum::http::StatusCode;
/// use campus_api::middleware::error_handling::map_error;
/// use campus_core::errors::CampusError;
///
/// let response = map_error(CampusError::Conflict("Parking spot B3 is already reserved".into()));
/// assert_eq!(response.status(), StatusCode::CONFLICT);
/// ```
pub fn map_error(err: CampusError) -> Response {
    AppError(err).into_response()
}
