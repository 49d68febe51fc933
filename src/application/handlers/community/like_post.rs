//! LikePostHandler - Likes a post once per user.
//!
//! A new like is social activity for both sides, so the liker and the post
//! author are evaluated concurrently. A repeated like changes nothing and
//! triggers no evaluation.

use std::sync::Arc;

use futures::join;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::handlers::gamification::EventDispatcher;
use crate::domain::community::CommunityError;
use crate::domain::foundation::{AchievementId, PostId, UserId};
use crate::domain::gamification::TriggerKind;
use crate::ports::{CommunityRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct LikePostCommand {
    pub post_id: PostId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikePostResult {
    pub liked: bool,
    pub likes_count: u32,
    /// Unlocked for the liker.
    pub newly_unlocked: Vec<AchievementId>,
    /// Unlocked for the post author.
    pub author_unlocked: Vec<AchievementId>,
}

pub struct LikePostHandler {
    users: Arc<dyn UserRepository>,
    community: Arc<dyn CommunityRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl LikePostHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        community: Arc<dyn CommunityRepository>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            users,
            community,
            dispatcher,
        }
    }

    pub async fn handle(&self, cmd: LikePostCommand) -> Result<LikePostResult, CommunityError> {
        if self.users.find_by_id(&cmd.user_id).await?.is_none() {
            return Err(CommunityError::UserNotFound(cmd.user_id));
        }

        let liked = self.community.like_post(&cmd.post_id, &cmd.user_id).await?;
        let post = self
            .community
            .find_post(&cmd.post_id)
            .await?
            .ok_or(CommunityError::PostNotFound(cmd.post_id))?;

        if !liked {
            debug!(user_id = %cmd.user_id, post_id = %cmd.post_id, "Post already liked");
            return Ok(LikePostResult {
                liked,
                likes_count: post.likes_count,
                newly_unlocked: Vec::new(),
                author_unlocked: Vec::new(),
            });
        }
        info!(user_id = %cmd.user_id, post_id = %cmd.post_id, "Post liked");

        let (newly_unlocked, author_unlocked) = if post.author_id == cmd.user_id {
            let unlocked = self.dispatcher.dispatch(&cmd.user_id, TriggerKind::Social).await;
            (unlocked, Vec::new())
        } else {
            join!(
                self.dispatcher.dispatch(&cmd.user_id, TriggerKind::Social),
                self.dispatcher.dispatch(&post.author_id, TriggerKind::Social),
            )
        };

        Ok(LikePostResult {
            liked,
            likes_count: post.likes_count,
            newly_unlocked,
            author_unlocked,
        })
    }
}
