//! HTTP handlers for the gamification test harness.
//!
//! Only mounted when `features.enable_test_harness` is set.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    AddXpRequest, EvaluateRequest, EvaluateResponse, SimulateLogsRequest, SimulateStreakRequest,
    UnlockResponse,
};
use crate::adapters::http::auth::AuthenticatedUser;
use crate::adapters::http::error::GamificationApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::gamification::{
    AwardXpCommand, EvaluateCommand, ResetProgressCommand, SimulateLogsCommand,
    SimulateStreakCommand, UnlockAchievementCommand,
};

/// POST /api/test/gamification/add-xp
pub async fn add_xp(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<AddXpRequest>,
) -> Result<impl IntoResponse, GamificationApiError> {
    let award = state
        .xp_ledger()
        .award_xp(AwardXpCommand {
            user_id: user.user_id,
            amount: req.amount,
            reason: req.reason.unwrap_or_else(|| "test harness".to_string()),
        })
        .await?;

    Ok(Json(award))
}

/// POST /api/test/gamification/simulate-streak
pub async fn simulate_streak(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<SimulateStreakRequest>,
) -> Result<impl IntoResponse, GamificationApiError> {
    let result = state
        .simulate_streak_handler()
        .handle(SimulateStreakCommand {
            user_id: user.user_id,
            days: req.days,
        })
        .await?;

    Ok(Json(result))
}

/// POST /api/test/gamification/simulate-logs
pub async fn simulate_logs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<SimulateLogsRequest>,
) -> Result<impl IntoResponse, GamificationApiError> {
    let result = state
        .simulate_logs_handler()
        .handle(SimulateLogsCommand {
            user_id: user.user_id,
            count: req.count,
        })
        .await?;

    Ok(Json(result))
}

/// POST /api/test/gamification/unlock/:achievement_id
pub async fn unlock(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(achievement_id): Path<String>,
) -> Result<impl IntoResponse, GamificationApiError> {
    let result = state
        .unlock_achievement_handler()
        .handle(UnlockAchievementCommand {
            user_id: user.user_id,
            achievement_id,
        })
        .await?;

    Ok(Json(UnlockResponse::from(result)))
}

/// POST /api/test/gamification/reset-user
pub async fn reset_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, GamificationApiError> {
    state
        .reset_progress_handler()
        .handle(ResetProgressCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/test/gamification/evaluate
pub async fn evaluate(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<EvaluateRequest>,
) -> Result<impl IntoResponse, GamificationApiError> {
    let newly_unlocked = state
        .dispatcher()
        .evaluate(EvaluateCommand {
            user_id: user.user_id,
            event_type: req.event_type,
            payload: req.payload,
        })
        .await?;

    Ok(Json(EvaluateResponse { newly_unlocked }))
}
