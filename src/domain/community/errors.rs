//! Community-specific errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, PostId, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommunityError {
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl CommunityError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CommunityError::PostNotFound(_) => ErrorCode::PostNotFound,
            CommunityError::UserNotFound(_) => ErrorCode::UserNotFound,
            CommunityError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            CommunityError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CommunityError::Infrastructure(_) => "Storage is unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for CommunityError {
    fn from(err: ValidationError) -> Self {
        CommunityError::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CommunityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PostNotFound => match err.details.get("post_id").map(|id| id.parse()) {
                Some(Ok(id)) => CommunityError::PostNotFound(id),
                _ => CommunityError::Infrastructure(err.to_string()),
            },
            _ => CommunityError::Infrastructure(err.to_string()),
        }
    }
}
