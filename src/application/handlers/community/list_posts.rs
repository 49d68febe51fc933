//! Read handlers for the community feed.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::community::{CommunityError, CommunityPost, PostReply};
use crate::domain::foundation::{PostId, Timestamp, UserId};
use crate::ports::CommunityRepository;

pub const DEFAULT_FEED_SIZE: u32 = 20;
pub const MAX_FEED_SIZE: u32 = 100;

/// A post as shown in the feed. Anonymous posts hide their author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub author_id: Option<UserId>,
    pub content: String,
    pub is_anonymous: bool,
    pub likes_count: u32,
    pub created_at: Timestamp,
}

impl From<CommunityPost> for PostView {
    fn from(post: CommunityPost) -> Self {
        Self {
            id: post.id,
            author_id: (!post.is_anonymous).then_some(post.author_id),
            content: post.content,
            is_anonymous: post.is_anonymous,
            likes_count: post.likes_count,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub struct ListPostsHandler {
    community: Arc<dyn CommunityRepository>,
}

impl ListPostsHandler {
    pub fn new(community: Arc<dyn CommunityRepository>) -> Self {
        Self { community }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<PostView>, CommunityError> {
        let limit = query.limit.unwrap_or(DEFAULT_FEED_SIZE).clamp(1, MAX_FEED_SIZE);
        let posts = self
            .community
            .list_posts(limit, query.offset.unwrap_or(0))
            .await?;
        Ok(posts.into_iter().map(PostView::from).collect())
    }
}

#[derive(Debug, Clone)]
pub struct ListRepliesQuery {
    pub post_id: PostId,
}

pub struct ListRepliesHandler {
    community: Arc<dyn CommunityRepository>,
}

impl ListRepliesHandler {
    pub fn new(community: Arc<dyn CommunityRepository>) -> Self {
        Self { community }
    }

    pub async fn handle(&self, query: ListRepliesQuery) -> Result<Vec<PostReply>, CommunityError> {
        if self.community.find_post(&query.post_id).await?.is_none() {
            return Err(CommunityError::PostNotFound(query.post_id));
        }
        Ok(self.community.list_replies(&query.post_id).await?)
    }
}
