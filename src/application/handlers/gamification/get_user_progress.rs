//! GetUserProgressHandler - Query handler for progress displays.

use std::sync::Arc;

use futures::try_join;
use serde::Serialize;

use super::ProgressEvaluator;
use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::{
    AchievementDefinition, GamificationError, LevelProgress, ProgressSnapshot,
};
use crate::ports::{AchievementCatalog, UserAchievementRepository};

#[derive(Debug, Clone)]
pub struct GetUserProgressQuery {
    pub user_id: UserId,
}

/// The locked achievement closest to unlocking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextAchievement {
    pub achievement_id: AchievementId,
    pub name: String,
    pub current: u32,
    pub target: u32,
    pub xp_reward: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProgressView {
    pub snapshot: ProgressSnapshot,
    pub level: LevelProgress,
    pub unlocked_count: usize,
    pub total_achievements: usize,
    pub next_achievement: Option<NextAchievement>,
}

pub struct GetUserProgressHandler {
    evaluator: Arc<ProgressEvaluator>,
    catalog: Arc<dyn AchievementCatalog>,
    unlocks: Arc<dyn UserAchievementRepository>,
}

impl GetUserProgressHandler {
    pub fn new(
        evaluator: Arc<ProgressEvaluator>,
        catalog: Arc<dyn AchievementCatalog>,
        unlocks: Arc<dyn UserAchievementRepository>,
    ) -> Self {
        Self {
            evaluator,
            catalog,
            unlocks,
        }
    }

    pub async fn handle(
        &self,
        query: GetUserProgressQuery,
    ) -> Result<UserProgressView, GamificationError> {
        let (user, snapshot) = self.evaluator.load(&query.user_id).await?;
        let (catalog, unlocked) = try_join!(
            self.catalog.list(),
            self.unlocks.unlocked_ids(&query.user_id),
        )?;

        let next_achievement = catalog
            .iter()
            .filter(|a| !unlocked.contains(&a.id))
            .filter_map(|a| closeness(a, &snapshot))
            .fold(None::<(u64, u64, NextAchievement)>, |best, (num, den, next)| match best {
                // Strictly closer wins, so ties keep catalog order.
                Some((b_num, b_den, _)) if num * b_den <= b_num * den => best,
                _ => Some((num, den, next)),
            })
            .map(|(_, _, next)| next);

        Ok(UserProgressView {
            level: user.level_progress(),
            unlocked_count: unlocked.len(),
            total_achievements: catalog.len(),
            next_achievement,
            snapshot,
        })
    }
}

/// Fraction complete as `(current, target)` plus the display entry.
fn closeness(
    achievement: &AchievementDefinition,
    snapshot: &ProgressSnapshot,
) -> Option<(u64, u64, NextAchievement)> {
    let current = achievement.condition.measure(snapshot)?;
    let target = u32::try_from(achievement.max_progress()?).ok()?;
    let shown = current.min(target);
    Some((
        u64::from(shown),
        u64::from(target),
        NextAchievement {
            achievement_id: achievement.id.clone(),
            name: achievement.name.clone(),
            current: shown,
            target,
            xp_reward: achievement.xp_reward,
        },
    ))
}
