//! Routes for incident log, streak and analytics endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{increment_streak, list_incidents, log_incident, weekly_analytics};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/logs`.
pub fn incident_routes() -> Router<AppState> {
    Router::new().route("/", post(log_incident).get(list_incidents))
}

/// Mounted at `/api/streak`.
pub fn streak_routes() -> Router<AppState> {
    Router::new().route("/increment", post(increment_streak))
}

/// Mounted at `/api/analytics`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/weekly", get(weekly_analytics))
}
