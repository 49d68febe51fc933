//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `gamification` - Achievement catalog, unlock conditions, XP and levels
//! - `user` - User aggregate with streak and XP counters
//! - `incident` - Junk-food incident logs
//! - `community` - Posts, likes and replies

pub mod community;
pub mod foundation;
pub mod gamification;
pub mod incident;
pub mod user;
