//! Request bodies for community endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRequest {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
