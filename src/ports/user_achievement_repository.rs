//! User achievement repository port.
//!
//! # Atomic unlock
//!
//! [`UserAchievementRepository::unlock`] is the single serialization point
//! for unlocks. It must insert the (user, achievement) record only if it is
//! absent and credit the reward in the same atomic step. When the record
//! already exists it writes nothing and returns
//! [`UnlockOutcome::AlreadyUnlocked`], so two concurrent evaluations can
//! never grant the same reward twice.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::foundation::{AchievementId, DomainError, UserId};
use crate::domain::gamification::{UnlockGrant, UnlockOutcome, UserAchievement};

#[async_trait]
pub trait UserAchievementRepository: Send + Sync {
    /// Ids of every achievement the user has unlocked.
    async fn unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<AchievementId>, DomainError>;

    /// Unlock records for a user, oldest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, DomainError>;

    /// Insert-if-absent plus XP credit, atomically.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist (nothing is written)
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn unlock(&self, grant: &UnlockGrant) -> Result<UnlockOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_achievement_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserAchievementRepository) {}
    }
}
