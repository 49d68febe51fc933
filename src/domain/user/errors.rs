//! Errors for user-scoped actions (registration, logging, streaks).

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(user_id: UserId) -> Self {
        UserError::NotFound(user_id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::AlreadyExists(_) => ErrorCode::UserExists,
            UserError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UserError::Infrastructure(_) => "Storage is unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UserExists => UserError::AlreadyExists(
                err.details.get("username").cloned().unwrap_or_default(),
            ),
            ErrorCode::UserNotFound => match err.details.get("user_id").map(|id| id.parse()) {
                Some(Ok(id)) => UserError::NotFound(id),
                _ => UserError::Infrastructure(err.to_string()),
            },
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}
