//! ProgressEvaluator - Builds a user's progress snapshot from persisted state.

use std::sync::Arc;

use futures::try_join;

use crate::domain::foundation::UserId;
use crate::domain::gamification::{GamificationError, ProgressSnapshot};
use crate::domain::user::User;
use crate::ports::{CommunityRepository, IncidentLogRepository, UserRepository};

/// Reads the measurable signals unlock conditions are tested against.
///
/// Never writes. Every snapshot is read fresh from storage so evaluation
/// never trusts numbers supplied by a caller.
pub struct ProgressEvaluator {
    users: Arc<dyn UserRepository>,
    logs: Arc<dyn IncidentLogRepository>,
    community: Arc<dyn CommunityRepository>,
}

impl ProgressEvaluator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        logs: Arc<dyn IncidentLogRepository>,
        community: Arc<dyn CommunityRepository>,
    ) -> Self {
        Self {
            users,
            logs,
            community,
        }
    }

    /// Snapshot for `user_id`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    /// - `Storage` if any read fails
    pub async fn snapshot(&self, user_id: &UserId) -> Result<ProgressSnapshot, GamificationError> {
        self.load(user_id).await.map(|(_, snapshot)| snapshot)
    }

    /// The user record together with its snapshot.
    pub async fn load(
        &self,
        user_id: &UserId,
    ) -> Result<(User, ProgressSnapshot), GamificationError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(GamificationError::UserNotFound(*user_id))?;

        let (total_logs, social) = try_join!(
            self.logs.count_for_user(user_id),
            self.community.social_counts(user_id),
        )?;

        let snapshot = ProgressSnapshot {
            user_id: *user_id,
            total_logs,
            current_streak: user.streak_count,
            best_streak: user.best_streak,
            social,
        };
        Ok((user, snapshot))
    }
}
