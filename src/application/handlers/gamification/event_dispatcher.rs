//! EventDispatcher - The seam every state-changing action calls afterwards.
//!
//! Two entry points:
//!
//! - [`EventDispatcher::evaluate`] is strict and returns errors. Used by the
//!   evaluation endpoint and the test harness.
//! - [`EventDispatcher::dispatch`] never fails. Used after a primary action
//!   (logging food, incrementing a streak, posting) whose own write already
//!   succeeded; an evaluation failure is logged and reported as "nothing new"
//!   so it never blocks or reverses that action. The next event re-evaluates
//!   from stored state and catches up.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::{ProgressEvaluator, UnlockEngine};
use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::{GamificationError, TriggerKind};

/// Command for a strict evaluation.
#[derive(Debug, Clone)]
pub struct EvaluateCommand {
    pub user_id: UserId,
    /// Raw event type tag (`log`, `streak`, `social`, `milestone`, `manual`, `test`).
    pub event_type: String,
    /// Optional caller context. Recorded in logs only.
    pub payload: Option<Value>,
}

pub struct EventDispatcher {
    evaluator: Arc<ProgressEvaluator>,
    engine: Arc<UnlockEngine>,
}

impl EventDispatcher {
    pub fn new(evaluator: Arc<ProgressEvaluator>, engine: Arc<UnlockEngine>) -> Self {
        Self { evaluator, engine }
    }

    /// Validates the event type, then evaluates.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an unknown event type (nothing is read or written)
    /// - `UserNotFound` if the user does not exist
    /// - `Storage` on any persistence failure
    pub async fn evaluate(
        &self,
        cmd: EvaluateCommand,
    ) -> Result<Vec<AchievementId>, GamificationError> {
        let kind: TriggerKind = cmd.event_type.parse()?;
        if let Some(payload) = &cmd.payload {
            debug!(user_id = %cmd.user_id, trigger = %kind, payload = %payload, "Evaluation payload");
        }
        self.run(&cmd.user_id, kind).await
    }

    /// Evaluates after a primary action. Failures yield an empty list.
    pub async fn dispatch(&self, user_id: &UserId, kind: TriggerKind) -> Vec<AchievementId> {
        match self.run(user_id, kind).await {
            Ok(unlocked) => unlocked,
            Err(err) => {
                warn!(
                    user_id = %user_id,
                    trigger = %kind,
                    error = %err,
                    "Achievement evaluation failed; primary action unaffected"
                );
                Vec::new()
            }
        }
    }

    async fn run(
        &self,
        user_id: &UserId,
        kind: TriggerKind,
    ) -> Result<Vec<AchievementId>, GamificationError> {
        let snapshot = self.evaluator.snapshot(user_id).await?;
        let unlocked = self.engine.evaluate(&snapshot).await?;
        debug!(
            user_id = %user_id,
            trigger = %kind,
            total_logs = snapshot.total_logs,
            current_streak = snapshot.current_streak,
            unlocked = unlocked.len(),
            "Achievements evaluated"
        );
        Ok(unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::DomainError;
    use crate::domain::gamification::{
        AchievementDefinition, BadgeCategory, UnlockCondition,
    };
    use crate::domain::incident::{IncidentLog, NewIncident};
    use crate::domain::user::User;
    use crate::ports::{AchievementCatalog, IncidentLogRepository, UserRepository};
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    struct BrokenCatalog;

    #[async_trait]
    impl AchievementCatalog for BrokenCatalog {
        async fn list(&self) -> Result<Vec<AchievementDefinition>, DomainError> {
            Err(DomainError::database("Simulated catalog outage"))
        }

        async fn find_by_id(
            &self,
            _id: &AchievementId,
        ) -> Result<Option<AchievementDefinition>, DomainError> {
            Err(DomainError::database("Simulated catalog outage"))
        }

        async fn upsert(&self, _definition: &AchievementDefinition) -> Result<(), DomainError> {
            Err(DomainError::database("Simulated catalog outage"))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn dispatcher(store: &Arc<InMemoryStore>, catalog: Arc<dyn AchievementCatalog>) -> EventDispatcher {
        let evaluator = Arc::new(ProgressEvaluator::new(store.clone(), store.clone(), store.clone()));
        let engine = Arc::new(UnlockEngine::new(catalog, store.clone()));
        EventDispatcher::new(evaluator, engine)
    }

    async fn setup() -> (Arc<InMemoryStore>, User) {
        let store = Arc::new(InMemoryStore::new());
        let first_log = AchievementDefinition::new(
            AchievementId::new("first_log").unwrap(),
            BadgeCategory::Milestone,
            "Honest Start",
            "",
            UnlockCondition::TotalLogs(1),
            5,
            0,
        )
        .unwrap();
        store.upsert(&first_log).await.unwrap();

        let user = User::new(UserId::new(), "sam", "sam@example.com").unwrap();
        store.create(&user).await.unwrap();
        let log = IncidentLog::record(
            user.id,
            NewIncident {
                food_type: "fries".to_string(),
                guilt_rating: 3,
                regret_rating: 3,
                estimated_cost: 3.0,
                calories: 400,
                location: None,
            },
        )
        .unwrap();
        store.append(&log).await.unwrap();
        (store, user)
    }

    fn command(user_id: UserId, event_type: &str) -> EvaluateCommand {
        EvaluateCommand {
            user_id,
            event_type: event_type.to_string(),
            payload: None,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn evaluate_unlocks_from_stored_state() {
        let (store, user) = setup().await;
        let dispatcher = dispatcher(&store, store.clone());

        let unlocked = dispatcher.evaluate(command(user.id, "log")).await.unwrap();
        assert_eq!(unlocked, vec![AchievementId::new("first_log").unwrap()]);
    }

    #[tokio::test]
    async fn any_trigger_kind_catches_up_on_missed_unlocks() {
        let (store, user) = setup().await;
        let dispatcher = dispatcher(&store, store.clone());

        let unlocked = dispatcher.dispatch(&user.id, TriggerKind::Streak).await;
        assert_eq!(unlocked.len(), 1);
    }

    #[tokio::test]
    async fn payload_does_not_change_the_result() {
        let (store, user) = setup().await;
        let dispatcher = dispatcher(&store, store.clone());
        let mut cmd = command(user.id, "milestone");
        cmd.payload = Some(serde_json::json!({ "total_logs": 500 }));

        let unlocked = dispatcher.evaluate(cmd).await.unwrap();
        assert_eq!(unlocked, vec![AchievementId::new("first_log").unwrap()]);
    }

    #[tokio::test]
    async fn unknown_event_type_is_rejected_without_side_effects() {
        let (store, user) = setup().await;
        let dispatcher = dispatcher(&store, store.clone());

        let err = dispatcher.evaluate(command(user.id, "purchase")).await.unwrap_err();
        assert!(matches!(err, GamificationError::InvalidInput { .. }));
        let stored = UserRepository::find_by_id(store.as_ref(), &user.id).await.unwrap().unwrap();
        assert_eq!(stored.xp, 0);
    }

    #[tokio::test]
    async fn strict_evaluation_surfaces_storage_failure() {
        let (store, user) = setup().await;
        let dispatcher = dispatcher(&store, Arc::new(BrokenCatalog));

        let err = dispatcher.evaluate(command(user.id, "log")).await.unwrap_err();
        assert!(matches!(err, GamificationError::Storage(_)));
    }

    #[tokio::test]
    async fn dispatch_swallows_storage_failure() {
        let (store, user) = setup().await;
        let dispatcher = dispatcher(&store, Arc::new(BrokenCatalog));

        assert!(dispatcher.dispatch(&user.id, TriggerKind::Log).await.is_empty());
    }

    #[tokio::test]
    async fn dispatch_for_unknown_user_is_empty() {
        let store = Arc::new(InMemoryStore::new());
        let dispatcher = dispatcher(&store, store.clone());

        assert!(dispatcher.dispatch(&UserId::new(), TriggerKind::Log).await.is_empty());
    }
}
