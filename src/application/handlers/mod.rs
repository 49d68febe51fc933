//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//! Gamification sits at the center; the other groups are its callers.

pub mod community;
pub mod gamification;
pub mod incident;
pub mod streak;
pub mod user;
