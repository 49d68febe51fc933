//! Routes for user endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create_user, get_me};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/users`.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/me", get(get_me))
}
