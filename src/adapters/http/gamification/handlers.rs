//! HTTP handlers for achievement and progress reads.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use super::dto::XpResponse;
use crate::adapters::http::auth::AuthenticatedUser;
use crate::adapters::http::error::{GamificationApiError, UserApiError};
use crate::adapters::http::state::AppState;
use crate::application::handlers::gamification::{
    GetUserProgressQuery, ListAchievementsQuery, ListUserAchievementsQuery,
};
use crate::application::handlers::user::GetProfileQuery;

/// GET /api/achievements - Full catalog with this user's unlock flags
pub async fn list_achievements(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, GamificationApiError> {
    let achievements = state
        .list_achievements_handler()
        .handle(ListAchievementsQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(achievements))
}

/// GET /api/user/achievements - Only the unlocked ones
pub async fn list_user_achievements(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, GamificationApiError> {
    let achievements = state
        .list_user_achievements_handler()
        .handle(ListUserAchievementsQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(achievements))
}

/// GET /api/user/progress - Snapshot, level and next target
pub async fn get_progress(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, GamificationApiError> {
    let view = state
        .user_progress_handler()
        .handle(GetUserProgressQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(view))
}

/// GET /api/user/xp
pub async fn get_xp(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, UserApiError> {
    let profile = state
        .get_profile_handler()
        .handle(GetProfileQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(XpResponse::from(profile.level)))
}
