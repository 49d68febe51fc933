//! IncrementStreakHandler - Adds a clean day to the user's streak.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::handlers::gamification::EventDispatcher;
use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::TriggerKind;
use crate::domain::user::{StreakUpdate, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct IncrementStreakCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncrementStreakResult {
    #[serde(flatten)]
    pub streak: StreakUpdate,
    pub newly_unlocked: Vec<AchievementId>,
}

pub struct IncrementStreakHandler {
    users: Arc<dyn UserRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl IncrementStreakHandler {
    pub fn new(users: Arc<dyn UserRepository>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self { users, dispatcher }
    }

    pub async fn handle(
        &self,
        cmd: IncrementStreakCommand,
    ) -> Result<IncrementStreakResult, UserError> {
        let streak = self
            .users
            .increment_streak(&cmd.user_id)
            .await?
            .ok_or(UserError::NotFound(cmd.user_id))?;

        if streak.is_new_record {
            info!(user_id = %cmd.user_id, best_streak = streak.best_streak, "New best streak");
        }

        let newly_unlocked = self.dispatcher.dispatch(&cmd.user_id, TriggerKind::Streak).await;
        Ok(IncrementStreakResult {
            streak,
            newly_unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::gamification::{ProgressEvaluator, UnlockEngine};
    use crate::domain::gamification::default_catalog;
    use crate::domain::user::User;
    use crate::ports::AchievementCatalog;

    async fn setup() -> (IncrementStreakHandler, User) {
        let store = Arc::new(InMemoryStore::new());
        for definition in default_catalog().unwrap() {
            store.upsert(&definition).await.unwrap();
        }
        let user = User::new(UserId::new(), "sam", "sam@example.com").unwrap();
        store.create(&user).await.unwrap();
        let evaluator = Arc::new(ProgressEvaluator::new(store.clone(), store.clone(), store.clone()));
        let engine = Arc::new(UnlockEngine::new(store.clone(), store.clone()));
        let dispatcher = Arc::new(EventDispatcher::new(evaluator, engine));
        (IncrementStreakHandler::new(store.clone(), dispatcher), user)
    }

    #[tokio::test]
    async fn three_increments_unlock_streak_badges() {
        let (handler, user) = setup().await;
        let cmd = IncrementStreakCommand { user_id: user.id };

        let day_one = handler.handle(cmd.clone()).await.unwrap();
        assert_eq!(day_one.streak.streak_count, 1);
        assert!(day_one.streak.is_new_record);
        assert_eq!(day_one.newly_unlocked, vec![AchievementId::new("first_day").unwrap()]);

        handler.handle(cmd.clone()).await.unwrap();
        let day_three = handler.handle(cmd).await.unwrap();
        assert_eq!(day_three.streak.best_streak, 3);
        assert_eq!(
            day_three.newly_unlocked,
            vec![AchievementId::new("three_day_streak").unwrap()]
        );
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (handler, _user) = setup().await;
        let ghost = UserId::new();
        let err = handler
            .handle(IncrementStreakCommand { user_id: ghost })
            .await
            .unwrap_err();
        assert_eq!(err, UserError::NotFound(ghost));
    }
}
