//! Community handlers.

mod create_post;
mod like_post;
mod list_posts;
mod reply_to_post;

pub use create_post::{CreatePostCommand, CreatePostHandler, CreatePostResult};
pub use like_post::{LikePostCommand, LikePostHandler, LikePostResult};
pub use list_posts::{
    ListPostsHandler, ListPostsQuery, ListRepliesHandler, ListRepliesQuery, PostView,
};
pub use reply_to_post::{ReplyToPostCommand, ReplyToPostHandler, ReplyToPostResult};
