//! User repository port.
//!
//! Streak and XP mutations are single operations rather than
//! read-modify-save pairs, so implementations can apply them atomically
//! and two concurrent requests never lose an update.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::gamification::{XpAmount, XpBalance};
use crate::domain::user::{StreakUpdate, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// - `UserExists` if the id, username or email is taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Returns `None` if the user does not exist.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Add one day to the streak. `None` if the user does not exist.
    async fn increment_streak(&self, id: &UserId) -> Result<Option<StreakUpdate>, DomainError>;

    /// Set the current streak, raising the best streak if needed.
    /// Returns false if the user does not exist.
    async fn set_streak(&self, id: &UserId, days: u32) -> Result<bool, DomainError>;

    /// Add XP and store the recomputed level in the same write.
    ///
    /// Returns `None` if the user does not exist.
    async fn credit_xp(&self, id: &UserId, amount: XpAmount)
        -> Result<Option<XpBalance>, DomainError>;

    /// Administrative reset: zero XP, level and streaks and delete the
    /// user's unlock records and incident logs, all in one atomic step.
    ///
    /// Returns false if the user does not exist (nothing is written). On
    /// error nothing is written either.
    async fn reset_progress(&self, id: &UserId) -> Result<bool, DomainError>;
}
