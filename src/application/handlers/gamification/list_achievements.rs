//! Catalog and unlock listings.

use std::collections::HashMap;
use std::sync::Arc;

use futures::try_join;
use serde::Serialize;

use super::ProgressEvaluator;
use crate::domain::foundation::{AchievementId, Timestamp, UserId};
use crate::domain::gamification::{AchievementDefinition, GamificationError, UserAchievement};
use crate::ports::{AchievementCatalog, UserAchievementRepository};

/// A catalog entry as seen by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementView {
    pub id: AchievementId,
    pub badge_type: String,
    pub badge_name: String,
    pub description: String,
    pub xp_reward: u32,
    pub max_progress: Option<i64>,
    /// Recorded progress once unlocked, else the current measured value.
    pub progress: Option<u32>,
    pub unlocked: bool,
    pub unlocked_at: Option<Timestamp>,
}

impl AchievementView {
    fn new(definition: &AchievementDefinition, record: Option<&UserAchievement>, current: Option<u32>) -> Self {
        Self {
            id: definition.id.clone(),
            badge_type: definition.category.to_string(),
            badge_name: definition.name.clone(),
            description: definition.description.clone(),
            xp_reward: definition.xp_reward,
            max_progress: definition.max_progress(),
            progress: record.map(|r| r.progress).or(current),
            unlocked: record.is_some(),
            unlocked_at: record.map(|r| r.unlocked_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListAchievementsQuery {
    pub user_id: UserId,
}

/// Full catalog in evaluation order with the user's unlock state.
pub struct ListAchievementsHandler {
    evaluator: Arc<ProgressEvaluator>,
    catalog: Arc<dyn AchievementCatalog>,
    unlocks: Arc<dyn UserAchievementRepository>,
}

impl ListAchievementsHandler {
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
        query: ListAchievementsQuery,
    ) -> Result<Vec<AchievementView>, GamificationError> {
        let snapshot = self.evaluator.snapshot(&query.user_id).await?;
        let (catalog, records) = try_join!(
            self.catalog.list(),
            self.unlocks.list_for_user(&query.user_id),
        )?;
        let records: HashMap<_, _> = records.iter().map(|r| (&r.achievement_id, r)).collect();

        Ok(catalog
            .iter()
            .map(|definition| {
                AchievementView::new(
                    definition,
                    records.get(&definition.id).copied(),
                    definition.condition.measure(&snapshot),
                )
            })
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct ListUserAchievementsQuery {
    pub user_id: UserId,
}

/// Only the achievements a user has unlocked, oldest first.
pub struct ListUserAchievementsHandler {
    evaluator: Arc<ProgressEvaluator>,
    catalog: Arc<dyn AchievementCatalog>,
    unlocks: Arc<dyn UserAchievementRepository>,
}

impl ListUserAchievementsHandler {
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
        query: ListUserAchievementsQuery,
    ) -> Result<Vec<AchievementView>, GamificationError> {
        // Existence check; an unknown user is NotFound rather than an empty list.
        self.evaluator.load(&query.user_id).await?;

        let (catalog, records) = try_join!(
            self.catalog.list(),
            self.unlocks.list_for_user(&query.user_id),
        )?;
        let definitions: HashMap<_, _> = catalog.iter().map(|d| (&d.id, d)).collect();

        Ok(records
            .iter()
            .filter_map(|record| {
                definitions
                    .get(&record.achievement_id)
                    .map(|definition| AchievementView::new(definition, Some(record), None))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::gamification::UnlockEngine;
    use crate::domain::gamification::{BadgeCategory, UnlockCondition};
    use crate::domain::user::User;
    use crate::ports::UserRepository;

    struct Fixture {
        store: Arc<InMemoryStore>,
        evaluator: Arc<ProgressEvaluator>,
        user: User,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        for (id, threshold, order) in [("first_day", 1, 0), ("week_warrior", 7, 1)] {
            let definition = AchievementDefinition::new(
                AchievementId::new(id).unwrap(),
                BadgeCategory::Streak,
                id,
                "",
                UnlockCondition::CurrentStreak(threshold),
                10,
                order,
            )
            .unwrap();
            store.upsert(&definition).await.unwrap();
        }
        let user = User::new(UserId::new(), "sam", "sam@example.com").unwrap();
        store.create(&user).await.unwrap();
        let evaluator = Arc::new(ProgressEvaluator::new(store.clone(), store.clone(), store.clone()));
        Fixture { store, evaluator, user }
    }

    #[tokio::test]
    async fn catalog_listing_flags_unlocked_entries() {
        let f = fixture().await;
        f.store.set_streak(&f.user.id, 3).await.unwrap();
        let engine = UnlockEngine::new(f.store.clone(), f.store.clone());
        engine.evaluate(&f.evaluator.snapshot(&f.user.id).await.unwrap()).await.unwrap();

        let handler = ListAchievementsHandler::new(f.evaluator.clone(), f.store.clone(), f.store.clone());
        let views = handler.handle(ListAchievementsQuery { user_id: f.user.id }).await.unwrap();

        assert_eq!(views.len(), 2);
        assert!(views[0].unlocked);
        assert!(views[0].unlocked_at.is_some());
        assert_eq!(views[0].progress, Some(3));
        assert!(!views[1].unlocked);
        assert_eq!(views[1].progress, Some(3));
        assert_eq!(views[1].max_progress, Some(7));
        assert_eq!(views[1].badge_type, "streak");
    }

    #[tokio::test]
    async fn user_listing_contains_only_unlocked() {
        let f = fixture().await;
        f.store.set_streak(&f.user.id, 1).await.unwrap();
        let engine = UnlockEngine::new(f.store.clone(), f.store.clone());
        engine.evaluate(&f.evaluator.snapshot(&f.user.id).await.unwrap()).await.unwrap();

        let handler =
            ListUserAchievementsHandler::new(f.evaluator.clone(), f.store.clone(), f.store.clone());
        let views = handler.handle(ListUserAchievementsQuery { user_id: f.user.id }).await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id.as_str(), "first_day");
    }

    #[tokio::test]
    async fn listings_for_unknown_user_fail() {
        let f = fixture().await;
        let handler =
            ListUserAchievementsHandler::new(f.evaluator.clone(), f.store.clone(), f.store.clone());
        let ghost = UserId::new();
        let err = handler.handle(ListUserAchievementsQuery { user_id: ghost }).await.unwrap_err();
        assert_eq!(err, GamificationError::UserNotFound(ghost));
    }
}
