//! Routes for community endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create_post, like_post, list_posts, list_replies, reply_to_post};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/community`.
pub fn community_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id/like", post(like_post))
        .route("/posts/:id/replies", get(list_replies).post(reply_to_post))
}
