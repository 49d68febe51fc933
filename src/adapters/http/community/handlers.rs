//! HTTP handlers for the community feed.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{CreatePostRequest, FeedParams, ReplyRequest};
use crate::adapters::http::auth::AuthenticatedUser;
use crate::adapters::http::error::CommunityApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::community::{
    CreatePostCommand, LikePostCommand, ListPostsQuery, ListRepliesQuery, ReplyToPostCommand,
};
use crate::domain::community::CommunityError;
use crate::domain::foundation::PostId;

fn parse_post_id(raw: &str) -> Result<PostId, CommunityApiError> {
    raw.parse().map_err(|_| {
        CommunityApiError(CommunityError::InvalidInput {
            field: "post_id".to_string(),
            message: "Invalid post ID".to_string(),
        })
    })
}

/// GET /api/community/posts - Newest posts first
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<impl IntoResponse, CommunityApiError> {
    let posts = state
        .list_posts_handler()
        .handle(ListPostsQuery {
            limit: params.limit,
            offset: params.offset,
        })
        .await?;

    Ok(Json(posts))
}

/// POST /api/community/posts - Publish a post
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, CommunityApiError> {
    let result = state
        .create_post_handler()
        .handle(CreatePostCommand {
            author_id: user.user_id,
            content: req.content,
            is_anonymous: req.is_anonymous,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /api/community/posts/:id/like - Like once; repeats are no-ops
pub async fn like_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, CommunityApiError> {
    let result = state
        .like_post_handler()
        .handle(LikePostCommand {
            post_id: parse_post_id(&post_id)?,
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(result))
}

/// GET /api/community/posts/:id/replies - Oldest first
pub async fn list_replies(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, CommunityApiError> {
    let replies = state
        .list_replies_handler()
        .handle(ListRepliesQuery {
            post_id: parse_post_id(&post_id)?,
        })
        .await?;

    Ok(Json(replies))
}

/// POST /api/community/posts/:id/replies - Reply to a post
pub async fn reply_to_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(post_id): Path<String>,
    Json(req): Json<ReplyRequest>,
) -> Result<impl IntoResponse, CommunityApiError> {
    let result = state
        .reply_to_post_handler()
        .handle(ReplyToPostCommand {
            post_id: parse_post_id(&post_id)?,
            author_id: user.user_id,
            content: req.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}
