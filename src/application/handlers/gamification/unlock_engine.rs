//! UnlockEngine - Decides which achievements a snapshot newly qualifies for
//! and persists each unlock exactly once.

use std::sync::Arc;

use futures::try_join;
use tracing::{debug, info};

use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::{
    select_unlockable, GamificationError, ProgressSnapshot, UnlockGrant, UnlockOutcome,
    XpBalance,
};
use crate::ports::{AchievementCatalog, UserAchievementRepository};

/// Result of a manual unlock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualUnlockResult {
    pub achievement_id: AchievementId,
    /// `None` when the achievement was already unlocked.
    pub balance: Option<XpBalance>,
}

impl ManualUnlockResult {
    pub fn newly_unlocked(&self) -> bool {
        self.balance.is_some()
    }
}

pub struct UnlockEngine {
    catalog: Arc<dyn AchievementCatalog>,
    unlocks: Arc<dyn UserAchievementRepository>,
}

impl UnlockEngine {
    pub fn new(
        catalog: Arc<dyn AchievementCatalog>,
        unlocks: Arc<dyn UserAchievementRepository>,
    ) -> Self {
        Self { catalog, unlocks }
    }

    /// Unlocks every catalog entry the snapshot satisfies that the user does
    /// not hold yet, in catalog order.
    ///
    /// Returns the ids that were unlocked by this call. An entry another
    /// evaluation unlocked concurrently is skipped without crediting XP.
    /// Entries unlocked before a storage failure stay unlocked; re-running
    /// picks up the rest.
    pub async fn evaluate(
        &self,
        snapshot: &ProgressSnapshot,
    ) -> Result<Vec<AchievementId>, GamificationError> {
        let (catalog, unlocked) = try_join!(
            self.catalog.list(),
            self.unlocks.unlocked_ids(&snapshot.user_id),
        )?;

        let mut newly_unlocked = Vec::new();
        for candidate in select_unlockable(&catalog, &unlocked, snapshot) {
            let grant = UnlockGrant::new(snapshot.user_id, candidate.achievement, candidate.progress);
            match self.unlocks.unlock(&grant).await? {
                UnlockOutcome::Unlocked(balance) => {
                    info!(
                        user_id = %snapshot.user_id,
                        achievement_id = %grant.achievement_id,
                        progress = grant.progress,
                        xp = balance.xp,
                        level = balance.level,
                        "Achievement unlocked"
                    );
                    newly_unlocked.push(grant.achievement_id);
                }
                UnlockOutcome::AlreadyUnlocked => {
                    debug!(
                        user_id = %snapshot.user_id,
                        achievement_id = %grant.achievement_id,
                        "Achievement unlocked concurrently, skipping"
                    );
                }
            }
        }
        Ok(newly_unlocked)
    }

    /// Grants one achievement regardless of its condition.
    ///
    /// The recorded progress is the measured value when the condition is
    /// measurable, else the threshold, else zero.
    ///
    /// # Errors
    ///
    /// - `AchievementNotFound` if the id is not in the catalog
    /// - `UserNotFound` if the user does not exist
    pub async fn unlock_manually(
        &self,
        user_id: &UserId,
        achievement_id: &AchievementId,
        snapshot: &ProgressSnapshot,
    ) -> Result<ManualUnlockResult, GamificationError> {
        let achievement = self
            .catalog
            .find_by_id(achievement_id)
            .await?
            .ok_or_else(|| GamificationError::AchievementNotFound(achievement_id.clone()))?;

        let progress = achievement
            .condition
            .measure(snapshot)
            .or_else(|| {
                achievement
                    .max_progress()
                    .and_then(|threshold| u32::try_from(threshold).ok())
            })
            .unwrap_or(0);

        let grant = UnlockGrant::new(*user_id, &achievement, progress);
        let balance = match self.unlocks.unlock(&grant).await? {
            UnlockOutcome::Unlocked(balance) => {
                info!(
                    user_id = %user_id,
                    achievement_id = %achievement_id,
                    xp = balance.xp,
                    "Achievement unlocked manually"
                );
                Some(balance)
            }
            UnlockOutcome::AlreadyUnlocked => None,
        };

        Ok(ManualUnlockResult {
            achievement_id: achievement_id.clone(),
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::DomainError;
    use crate::domain::gamification::{
        AchievementDefinition, BadgeCategory, UnlockCondition, UserAchievement,
    };
    use crate::domain::user::User;
    use crate::ports::UserRepository;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Reports every unlock as already taken, as if another request won the race.
    struct RacingUnlocks {
        attempts: Mutex<Vec<AchievementId>>,
    }

    #[async_trait]
    impl UserAchievementRepository for RacingUnlocks {
        async fn unlocked_ids(&self, _user_id: &UserId) -> Result<HashSet<AchievementId>, DomainError> {
            Ok(HashSet::new())
        }

        async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<UserAchievement>, DomainError> {
            Ok(Vec::new())
        }

        async fn unlock(&self, grant: &UnlockGrant) -> Result<UnlockOutcome, DomainError> {
            self.attempts.lock().unwrap().push(grant.achievement_id.clone());
            Ok(UnlockOutcome::AlreadyUnlocked)
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn definition(id: &str, condition: UnlockCondition, reward: u32, order: i32) -> AchievementDefinition {
        AchievementDefinition::new(
            AchievementId::new(id).unwrap(),
            BadgeCategory::Milestone,
            id,
            "",
            condition,
            reward,
            order,
        )
        .unwrap()
    }

    async fn setup() -> (Arc<InMemoryStore>, User) {
        let store = Arc::new(InMemoryStore::new());
        store
            .upsert(&definition("first_log", UnlockCondition::TotalLogs(1), 5, 0))
            .await
            .unwrap();
        store
            .upsert(&definition("ten_logs", UnlockCondition::TotalLogs(10), 60, 1))
            .await
            .unwrap();
        store
            .upsert(&definition(
                "early_bird",
                UnlockCondition::Unsupported { metric: None, threshold: None },
                30,
                2,
            ))
            .await
            .unwrap();
        let user = User::new(UserId::new(), "sam", "sam@example.com").unwrap();
        store.create(&user).await.unwrap();
        (store, user)
    }

    fn snapshot(user_id: UserId, total_logs: u32) -> ProgressSnapshot {
        ProgressSnapshot {
            total_logs,
            ..ProgressSnapshot::empty(user_id)
        }
    }

    fn ids(values: &[&str]) -> Vec<AchievementId> {
        values.iter().map(|v| AchievementId::new(*v).unwrap()).collect()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Evaluation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unlocks_qualifying_achievements_in_catalog_order() {
        let (store, user) = setup().await;
        let engine = UnlockEngine::new(store.clone(), store.clone());

        let unlocked = engine.evaluate(&snapshot(user.id, 10)).await.unwrap();
        assert_eq!(unlocked, ids(&["first_log", "ten_logs"]));

        let stored = UserRepository::find_by_id(store.as_ref(), &user.id).await.unwrap().unwrap();
        assert_eq!(stored.xp, 65);
    }

    #[tokio::test]
    async fn second_evaluation_is_empty_and_credits_nothing() {
        let (store, user) = setup().await;
        let engine = UnlockEngine::new(store.clone(), store.clone());

        engine.evaluate(&snapshot(user.id, 10)).await.unwrap();
        let again = engine.evaluate(&snapshot(user.id, 10)).await.unwrap();
        assert!(again.is_empty());

        let stored = UserRepository::find_by_id(store.as_ref(), &user.id).await.unwrap().unwrap();
        assert_eq!(stored.xp, 65);
    }

    #[tokio::test]
    async fn below_threshold_unlocks_nothing() {
        let (store, user) = setup().await;
        let engine = UnlockEngine::new(store.clone(), store.clone());

        let unlocked = engine.evaluate(&snapshot(user.id, 9)).await.unwrap();
        assert_eq!(unlocked, ids(&["first_log"]));
    }

    #[tokio::test]
    async fn lost_race_is_not_reported() {
        let (store, user) = setup().await;
        let racing = Arc::new(RacingUnlocks { attempts: Mutex::new(Vec::new()) });
        let engine = UnlockEngine::new(store.clone(), racing.clone());

        let unlocked = engine.evaluate(&snapshot(user.id, 10)).await.unwrap();
        assert!(unlocked.is_empty());
        assert_eq!(racing.attempts.lock().unwrap().len(), 2);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Manual Unlock Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn manual_unlock_grants_unsupported_achievement() {
        let (store, user) = setup().await;
        let engine = UnlockEngine::new(store.clone(), store.clone());
        let early_bird = AchievementId::new("early_bird").unwrap();

        let result = engine
            .unlock_manually(&user.id, &early_bird, &snapshot(user.id, 0))
            .await
            .unwrap();
        assert!(result.newly_unlocked());
        assert_eq!(result.balance.map(|b| b.xp), Some(30));

        let records = UserAchievementRepository::list_for_user(store.as_ref(), &user.id)
            .await
            .unwrap();
        assert_eq!(records[0].progress, 0);
    }

    #[tokio::test]
    async fn manual_unlock_twice_is_a_no_op() {
        let (store, user) = setup().await;
        let engine = UnlockEngine::new(store.clone(), store.clone());
        let first_log = AchievementId::new("first_log").unwrap();

        engine.unlock_manually(&user.id, &first_log, &snapshot(user.id, 0)).await.unwrap();
        let again = engine
            .unlock_manually(&user.id, &first_log, &snapshot(user.id, 0))
            .await
            .unwrap();
        assert!(!again.newly_unlocked());

        let stored = UserRepository::find_by_id(store.as_ref(), &user.id).await.unwrap().unwrap();
        assert_eq!(stored.xp, 5);
    }

    #[tokio::test]
    async fn manual_unlock_of_unknown_achievement_fails() {
        let (store, user) = setup().await;
        let engine = UnlockEngine::new(store.clone(), store.clone());
        let missing = AchievementId::new("moon_landing").unwrap();

        let err = engine
            .unlock_manually(&user.id, &missing, &snapshot(user.id, 0))
            .await
            .unwrap_err();
        assert_eq!(err, GamificationError::AchievementNotFound(missing));
    }
}
