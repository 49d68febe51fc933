//! UnlockAchievementHandler - Administrative grant of a single achievement.

use std::sync::Arc;

use super::{ManualUnlockResult, ProgressEvaluator, UnlockEngine};
use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::GamificationError;

#[derive(Debug, Clone)]
pub struct UnlockAchievementCommand {
    pub user_id: UserId,
    pub achievement_id: String,
}

pub struct UnlockAchievementHandler {
    evaluator: Arc<ProgressEvaluator>,
    engine: Arc<UnlockEngine>,
}

impl UnlockAchievementHandler {
    pub fn new(evaluator: Arc<ProgressEvaluator>, engine: Arc<UnlockEngine>) -> Self {
        Self { evaluator, engine }
    }

    /// # Errors
    ///
    /// - `InvalidInput` if the id is not a valid slug
    /// - `UserNotFound` / `AchievementNotFound`
    pub async fn handle(
        &self,
        cmd: UnlockAchievementCommand,
    ) -> Result<ManualUnlockResult, GamificationError> {
        let achievement_id = AchievementId::new(cmd.achievement_id)?;
        let snapshot = self.evaluator.snapshot(&cmd.user_id).await?;
        self.engine
            .unlock_manually(&cmd.user_id, &achievement_id, &snapshot)
            .await
    }
}
