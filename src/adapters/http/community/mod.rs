//! HTTP adapter for the community feed.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreatePostRequest, FeedParams, ReplyRequest};
pub use routes::community_routes;
