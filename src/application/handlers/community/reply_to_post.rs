//! ReplyToPostHandler - Adds a reply under an existing post.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::handlers::gamification::EventDispatcher;
use crate::domain::community::{CommunityError, PostReply};
use crate::domain::foundation::{AchievementId, PostId, UserId};
use crate::domain::gamification::TriggerKind;
use crate::ports::{CommunityRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ReplyToPostCommand {
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyToPostResult {
    pub reply: PostReply,
    pub newly_unlocked: Vec<AchievementId>,
}

pub struct ReplyToPostHandler {
    users: Arc<dyn UserRepository>,
    community: Arc<dyn CommunityRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl ReplyToPostHandler {
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

    pub async fn handle(
        &self,
        cmd: ReplyToPostCommand,
    ) -> Result<ReplyToPostResult, CommunityError> {
        let reply = PostReply::new(cmd.post_id, cmd.author_id, cmd.content)?;

        if self.users.find_by_id(&cmd.author_id).await?.is_none() {
            return Err(CommunityError::UserNotFound(cmd.author_id));
        }
        self.community.add_reply(&reply).await?;
        info!(user_id = %cmd.author_id, post_id = %cmd.post_id, reply_id = %reply.id, "Reply added");

        let newly_unlocked = self
            .dispatcher
            .dispatch(&cmd.author_id, TriggerKind::Social)
            .await;
        Ok(ReplyToPostResult {
            reply,
            newly_unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::community::test_support::setup;
    use crate::domain::community::CommunityPost;

    #[tokio::test]
    async fn reply_is_listed_under_post() {
        let ctx = setup().await;
        let post = CommunityPost::new(ctx.alice.id, "Craving pizza", false).unwrap();
        ctx.store.create_post(&post).await.unwrap();
        let handler = ReplyToPostHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.dispatcher.clone());

        let result = handler
            .handle(ReplyToPostCommand {
                post_id: post.id,
                author_id: ctx.bob.id,
                content: "Drink some water first".to_string(),
            })
            .await
            .unwrap();

        let replies = ctx.store.list_replies(&post.id).await.unwrap();
        assert_eq!(replies, vec![result.reply]);
    }

    #[tokio::test]
    async fn reply_to_missing_post_is_not_found() {
        let ctx = setup().await;
        let handler = ReplyToPostHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.dispatcher.clone());
        let ghost = PostId::new();

        let err = handler
            .handle(ReplyToPostCommand {
                post_id: ghost,
                author_id: ctx.bob.id,
                content: "hello?".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CommunityError::PostNotFound(ghost));
    }
}
