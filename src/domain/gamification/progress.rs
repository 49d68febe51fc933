//! Progress snapshot - the measurable signals unlock conditions are tested against.

use serde::Serialize;

use crate::domain::foundation::UserId;

/// Community activity counts for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SocialCounts {
    pub posts_created: u32,
    pub likes_given: u32,
    pub likes_received: u32,
    pub replies_written: u32,
}

/// Read-only view of a user's progress at the moment an event is evaluated.
///
/// Always derived from persisted state, never from caller-supplied numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub user_id: UserId,
    pub total_logs: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub social: SocialCounts,
}

impl ProgressSnapshot {
    /// Snapshot of a user with no recorded activity.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            total_logs: 0,
            current_streak: 0,
            best_streak: 0,
            social: SocialCounts::default(),
        }
    }
}
