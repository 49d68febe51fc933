//! Error responses for the HTTP adapter.
//!
//! Each error family gets a newtype implementing `IntoResponse`, so axum
//! handlers can return `Result<_, XxxApiError>` and use `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::community::CommunityError;
use crate::domain::foundation::ErrorCode;
use crate::domain::gamification::GamificationError;
use crate::domain::user::UserError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::UserNotFound | ErrorCode::AchievementNotFound | ErrorCode::PostNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::UserExists | ErrorCode::AchievementAlreadyUnlocked => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(code: ErrorCode, message: String, internal: &dyn std::fmt::Display) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        error!(code = %code, error = %internal, "Request failed");
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Newtypes
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct UserApiError(pub UserError);

impl From<UserError> for UserApiError {
    fn from(err: UserError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        respond(self.0.code(), self.0.message(), &self.0)
    }
}

#[derive(Debug)]
pub struct GamificationApiError(pub GamificationError);

impl From<GamificationError> for GamificationApiError {
    fn from(err: GamificationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for GamificationApiError {
    fn into_response(self) -> Response {
        respond(self.0.code(), self.0.message(), &self.0)
    }
}

#[derive(Debug)]
pub struct CommunityApiError(pub CommunityError);

impl From<CommunityError> for CommunityApiError {
    fn from(err: CommunityError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CommunityApiError {
    fn into_response(self) -> Response {
        respond(self.0.code(), self.0.message(), &self.0)
    }
}
