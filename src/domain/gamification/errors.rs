//! Gamification-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | UserNotFound | 404 |
//! | AchievementNotFound | 404 |
//! | InvalidInput | 400 |
//! | Storage | 500 |
//!
//! A duplicate unlock is not an error; it surfaces as
//! `UnlockOutcome::AlreadyUnlocked`.

use thiserror::Error;

use crate::domain::foundation::{AchievementId, DomainError, ErrorCode, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GamificationError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Achievement not found: {0}")]
    AchievementNotFound(AchievementId),

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl GamificationError {
    pub fn user_not_found(user_id: UserId) -> Self {
        GamificationError::UserNotFound(user_id)
    }

    pub fn achievement_not_found(id: AchievementId) -> Self {
        GamificationError::AchievementNotFound(id)
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        GamificationError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        GamificationError::Storage(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GamificationError::UserNotFound(_) => ErrorCode::UserNotFound,
            GamificationError::AchievementNotFound(_) => ErrorCode::AchievementNotFound,
            GamificationError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            GamificationError::Storage(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        match self {
            GamificationError::Storage(_) => "Achievement storage is unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for GamificationError {
    fn from(err: ValidationError) -> Self {
        GamificationError::invalid_input(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for GamificationError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned().unwrap_or_default();
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                GamificationError::invalid_input(detail("field"), err.message.clone())
            }
            ErrorCode::UserNotFound => match detail("user_id").parse::<UserId>() {
                Ok(id) => GamificationError::UserNotFound(id),
                Err(_) => GamificationError::Storage(err.to_string()),
            },
            ErrorCode::AchievementNotFound => match AchievementId::new(detail("achievement_id")) {
                Ok(id) => GamificationError::AchievementNotFound(id),
                Err(_) => GamificationError::Storage(err.to_string()),
            },
            _ => GamificationError::Storage(err.to_string()),
        }
    }
}
