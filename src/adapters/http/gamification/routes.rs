//! Routes for achievement reads and the test harness.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_progress, get_xp, list_achievements, list_user_achievements};
use super::harness;
use crate::adapters::http::state::AppState;

/// Mounted at `/api`.
///
/// - `GET /achievements`
/// - `GET /user/achievements`
/// - `GET /user/progress`
/// - `GET /user/xp`
pub fn gamification_routes() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(list_achievements))
        .route("/user/achievements", get(list_user_achievements))
        .route("/user/progress", get(get_progress))
        .route("/user/xp", get(get_xp))
}

/// Mounted at `/api/test/gamification`.
pub fn test_harness_routes() -> Router<AppState> {
    Router::new()
        .route("/add-xp", post(harness::add_xp))
        .route("/simulate-streak", post(harness::simulate_streak))
        .route("/simulate-logs", post(harness::simulate_logs))
        .route("/unlock/:achievement_id", post(harness::unlock))
        .route("/reset-user", post(harness::reset_user))
        .route("/evaluate", post(harness::evaluate))
}
