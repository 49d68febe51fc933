//! HTTP handlers for user endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{CreateUserRequest, ProfileResponse, UserResponse};
use crate::adapters::http::auth::AuthenticatedUser;
use crate::adapters::http::error::UserApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::user::{CreateUserCommand, GetProfileQuery};

/// POST /api/users - Register a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let user = state
        .create_user_handler()
        .handle(CreateUserCommand {
            username: req.username,
            email: req.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/me - Profile with level and log totals
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, UserApiError> {
    let profile = state
        .get_profile_handler()
        .handle(GetProfileQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ProfileResponse {
        user: profile.user.into(),
        level: profile.level,
        totals: profile.totals,
    }))
}
