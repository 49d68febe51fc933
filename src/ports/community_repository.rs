//! Community repository port.

use async_trait::async_trait;

use crate::domain::community::{CommunityPost, PostReply};
use crate::domain::foundation::{DomainError, PostId, UserId};
use crate::domain::gamification::SocialCounts;

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn create_post(&self, post: &CommunityPost) -> Result<(), DomainError>;

    /// Returns `None` if the post does not exist.
    async fn find_post(&self, id: &PostId) -> Result<Option<CommunityPost>, DomainError>;

    /// Posts, newest first.
    async fn list_posts(&self, limit: u32, offset: u32) -> Result<Vec<CommunityPost>, DomainError>;

    /// Record a like if the user has not liked the post yet.
    ///
    /// Returns true when a new like was stored.
    ///
    /// # Errors
    ///
    /// - `PostNotFound` if the post does not exist
    async fn like_post(&self, post_id: &PostId, user_id: &UserId) -> Result<bool, DomainError>;

    /// # Errors
    ///
    /// - `PostNotFound` if the post does not exist
    async fn add_reply(&self, reply: &PostReply) -> Result<(), DomainError>;

    /// Replies to a post, oldest first.
    async fn list_replies(&self, post_id: &PostId) -> Result<Vec<PostReply>, DomainError>;

    /// Counts of the user's community activity.
    async fn social_counts(&self, user_id: &UserId) -> Result<SocialCounts, DomainError>;
}
