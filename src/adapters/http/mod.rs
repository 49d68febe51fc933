//! HTTP adapter - REST API over axum.
//!
//! Each endpoint group has its own module with dto, handlers and routes;
//! `router` assembles them under `/api`.

pub mod auth;
pub mod community;
pub mod error;
pub mod gamification;
pub mod incident;
pub mod router;
pub mod state;
pub mod user;

pub use auth::{AuthenticatedUser, USER_ID_HEADER};
pub use error::ErrorResponse;
pub use router::app_router;
pub use state::AppState;
