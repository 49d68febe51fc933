//! Community posts and replies.

use serde::Serialize;

use crate::domain::foundation::{PostId, ReplyId, Timestamp, UserId, ValidationError};

const MAX_CONTENT_LEN: usize = 1000;

fn validate_content(content: String) -> Result<String, ValidationError> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(ValidationError::empty_field("content"));
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_LEN {
        return Err(ValidationError::out_of_range(
            "content",
            1,
            MAX_CONTENT_LEN as i64,
            len as i64,
        ));
    }
    Ok(content)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityPost {
    pub id: PostId,
    pub author_id: UserId,
    pub content: String,
    pub is_anonymous: bool,
    pub likes_count: u32,
    pub created_at: Timestamp,
}

impl CommunityPost {
    pub fn new(
        author_id: UserId,
        content: impl Into<String>,
        is_anonymous: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: PostId::new(),
            author_id,
            content: validate_content(content.into())?,
            is_anonymous,
            likes_count: 0,
            created_at: Timestamp::now(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostReply {
    pub id: ReplyId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: Timestamp,
}

impl PostReply {
    pub fn new(
        post_id: PostId,
        author_id: UserId,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ReplyId::new(),
            post_id,
            author_id,
            content: validate_content(content.into())?,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_content_is_trimmed() {
        let post = CommunityPost::new(UserId::new(), "  day three!  ", false).unwrap();
        assert_eq!(post.content, "day three!");
        assert_eq!(post.likes_count, 0);
    }

    #[test]
    fn empty_content_is_rejected() {
        assert!(matches!(
            CommunityPost::new(UserId::new(), "   ", true),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(PostReply::new(PostId::new(), UserId::new(), "").is_err());
    }

    #[test]
    fn overlong_content_is_rejected() {
        let long = "a".repeat(MAX_CONTENT_LEN + 1);
        assert!(matches!(
            CommunityPost::new(UserId::new(), long, false),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
