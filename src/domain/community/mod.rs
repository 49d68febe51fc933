//! Community module - Posts, likes and replies.

mod errors;
mod post;

pub use errors::CommunityError;
pub use post::{CommunityPost, PostReply};
