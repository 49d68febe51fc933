//! User handlers.

mod create_user;
mod get_profile;

pub use create_user::{CreateUserCommand, CreateUserHandler};
pub use get_profile::{GetProfileHandler, GetProfileQuery, UserProfile};
