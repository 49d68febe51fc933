//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the JunkStop domain.

mod errors;
mod ids;
mod rating;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AchievementId, IncidentLogId, PostId, ReplyId, UserId};
pub use rating::Rating;
pub use timestamp::Timestamp;
