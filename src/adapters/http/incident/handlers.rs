//! HTTP handlers for incident logs, streaks and analytics.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{LogIncidentRequest, PageParams};
use crate::adapters::http::auth::AuthenticatedUser;
use crate::adapters::http::error::UserApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::incident::{
    ListIncidentsQuery, LogIncidentCommand, WeeklyAnalyticsQuery,
};
use crate::application::handlers::streak::IncrementStreakCommand;

/// POST /api/logs - Record an incident and break the streak
pub async fn log_incident(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<LogIncidentRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let result = state
        .log_incident_handler()
        .handle(LogIncidentCommand {
            user_id: user.user_id,
            incident: req.into(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/logs?limit&offset - Newest first, with totals
pub async fn list_incidents(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(page): Query<PageParams>,
) -> Result<impl IntoResponse, UserApiError> {
    let page = state
        .list_incidents_handler()
        .handle(ListIncidentsQuery {
            user_id: user.user_id,
            limit: page.limit,
            offset: page.offset,
        })
        .await?;

    Ok(Json(page))
}

/// GET /api/analytics/weekly - Totals, averages and a per-day breakdown
pub async fn weekly_analytics(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, UserApiError> {
    let analytics = state
        .weekly_analytics_handler()
        .handle(WeeklyAnalyticsQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(analytics))
}

/// POST /api/streak/increment - Count one more clean day
pub async fn increment_streak(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, UserApiError> {
    let result = state
        .increment_streak_handler()
        .handle(IncrementStreakCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(result))
}
