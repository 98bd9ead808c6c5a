use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A required prior state is missing, such as a locker request from a
    /// student without an active parking reservation.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CampusError {
    /// True for failures the caller cannot fix by changing the request.
    pub fn is_server_error(&self) -> bool {
        matches!(self, CampusError::Database(_) | CampusError::Internal(_))
    }
}

pub type CampusResult<T> = Result<T, CampusError>;
