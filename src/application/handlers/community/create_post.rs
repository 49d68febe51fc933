//! CreatePostHandler - Publishes a post to the community feed.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::handlers::gamification::EventDispatcher;
use crate::domain::community::{CommunityError, CommunityPost};
use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::TriggerKind;
use crate::ports::{CommunityRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub author_id: UserId,
    pub content: String,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePostResult {
    pub post: CommunityPost,
    pub newly_unlocked: Vec<AchievementId>,
}

pub struct CreatePostHandler {
    users: Arc<dyn UserRepository>,
    community: Arc<dyn CommunityRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl CreatePostHandler {
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

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<CreatePostResult, CommunityError> {
        let post = CommunityPost::new(cmd.author_id, cmd.content, cmd.is_anonymous)?;

        if self.users.find_by_id(&cmd.author_id).await?.is_none() {
            return Err(CommunityError::UserNotFound(cmd.author_id));
        }
        self.community.create_post(&post).await?;
        info!(user_id = %cmd.author_id, post_id = %post.id, anonymous = post.is_anonymous, "Post created");

        let newly_unlocked = self
            .dispatcher
            .dispatch(&cmd.author_id, TriggerKind::Social)
            .await;
        Ok(CreatePostResult {
            post,
            newly_unlocked,
        })
    }
}
