//! SimulateLogsHandler - Test-harness shortcut that tops a user's log count
//! up to a target.
//!
//! Unlike a real log, simulated logs do not break the streak.

use std::sync::Arc;

use serde::Serialize;

use super::{EvaluateCommand, EventDispatcher};
use crate::domain::foundation::{AchievementId, UserId, ValidationError};
use crate::domain::gamification::{GamificationError, TriggerKind};
use crate::domain::incident::{IncidentLog, NewIncident};
use crate::ports::{IncidentLogRepository, UserRepository};

const MAX_SIMULATED_LOGS: i64 = 1000;

#[derive(Debug, Clone)]
pub struct SimulateLogsCommand {
    pub user_id: UserId,
    /// Total log count to reach.
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulateLogsResult {
    pub created: u32,
    pub total_logs: u32,
    pub newly_unlocked: Vec<AchievementId>,
}

pub struct SimulateLogsHandler {
    users: Arc<dyn UserRepository>,
    logs: Arc<dyn IncidentLogRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl SimulateLogsHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        logs: Arc<dyn IncidentLogRepository>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            users,
            logs,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SimulateLogsCommand,
    ) -> Result<SimulateLogsResult, GamificationError> {
        if !(0..=MAX_SIMULATED_LOGS).contains(&cmd.count) {
            return Err(
                ValidationError::out_of_range("count", 0, MAX_SIMULATED_LOGS, cmd.count).into(),
            );
        }
        let target = cmd.count as u32;
        if self.users.find_by_id(&cmd.user_id).await?.is_none() {
            return Err(GamificationError::UserNotFound(cmd.user_id));
        }

        let existing = self.logs.count_for_user(&cmd.user_id).await?;
        let missing = target.saturating_sub(existing);
        for n in 0..missing {
            let log = IncidentLog::record(
                cmd.user_id,
                NewIncident {
                    food_type: format!("Simulated snack #{}", existing + n + 1),
                    guilt_rating: 5,
                    regret_rating: 5,
                    estimated_cost: 0.0,
                    calories: 0,
                    location: None,
                },
            )?;
            self.logs.append(&log).await?;
        }

        let newly_unlocked = self
            .dispatcher
            .evaluate(EvaluateCommand {
                user_id: cmd.user_id,
                event_type: TriggerKind::Log.to_string(),
                payload: None,
            })
            .await?;

        Ok(SimulateLogsResult {
            created: missing,
            total_logs: existing.max(target),
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

    async fn setup() -> (Arc<InMemoryStore>, SimulateLogsHandler, User) {
        let store = Arc::new(InMemoryStore::new());
        for definition in default_catalog().unwrap() {
            store.upsert(&definition).await.unwrap();
        }
        let user = User::new(UserId::new(), "sam", "sam@example.com").unwrap();
        store.create(&user).await.unwrap();
        let evaluator = Arc::new(ProgressEvaluator::new(store.clone(), store.clone(), store.clone()));
        let engine = Arc::new(UnlockEngine::new(store.clone(), store.clone()));
        let dispatcher = Arc::new(EventDispatcher::new(evaluator, engine));
        let handler = SimulateLogsHandler::new(store.clone(), store.clone(), dispatcher);
        (store, handler, user)
    }

    #[tokio::test]
    async fn tops_up_to_target_count() {
        let (store, handler, user) = setup().await;

        let first = handler.handle(SimulateLogsCommand { user_id: user.id, count: 1 }).await.unwrap();
        assert_eq!(first.created, 1);
        assert_eq!(first.newly_unlocked, vec![AchievementId::new("first_log").unwrap()]);

        let second = handler.handle(SimulateLogsCommand { user_id: user.id, count: 10 }).await.unwrap();
        assert_eq!(second.created, 9);
        assert_eq!(second.total_logs, 10);
        assert_eq!(second.newly_unlocked, vec![AchievementId::new("ten_logs").unwrap()]);

        assert_eq!(store.count_for_user(&user.id).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn lower_target_creates_nothing() {
        let (_store, handler, user) = setup().await;
        handler.handle(SimulateLogsCommand { user_id: user.id, count: 5 }).await.unwrap();

        let result = handler.handle(SimulateLogsCommand { user_id: user.id, count: 2 }).await.unwrap();
        assert_eq!(result.created, 0);
        assert_eq!(result.total_logs, 5);
        assert!(result.newly_unlocked.is_empty());
    }

    #[tokio::test]
    async fn simulated_logs_keep_streak() {
        let (store, handler, user) = setup().await;
        store.set_streak(&user.id, 3).await.unwrap();
        handler.handle(SimulateLogsCommand { user_id: user.id, count: 2 }).await.unwrap();

        let stored = UserRepository::find_by_id(store.as_ref(), &user.id).await.unwrap().unwrap();
        assert_eq!(stored.streak_count, 3);
    }

    #[tokio::test]
    async fn count_above_limit_is_rejected() {
        let (_store, handler, user) = setup().await;
        let err = handler
            .handle(SimulateLogsCommand { user_id: user.id, count: 5000 })
            .await
            .unwrap_err();
        assert!(matches!(err, GamificationError::InvalidInput { .. }));
    }
}
