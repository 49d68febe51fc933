//! SimulateStreakHandler - Test-harness shortcut that sets a streak directly.

use std::sync::Arc;

use serde::Serialize;

use super::{EvaluateCommand, EventDispatcher};
use crate::domain::foundation::{AchievementId, UserId, ValidationError};
use crate::domain::gamification::{GamificationError, TriggerKind};
use crate::ports::UserRepository;

const MAX_SIMULATED_DAYS: i64 = 3650;

#[derive(Debug, Clone)]
pub struct SimulateStreakCommand {
    pub user_id: UserId,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulateStreakResult {
    pub streak_count: u32,
    pub best_streak: u32,
    pub newly_unlocked: Vec<AchievementId>,
}

pub struct SimulateStreakHandler {
    users: Arc<dyn UserRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl SimulateStreakHandler {
    pub fn new(users: Arc<dyn UserRepository>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self { users, dispatcher }
    }

    pub async fn handle(
        &self,
        cmd: SimulateStreakCommand,
    ) -> Result<SimulateStreakResult, GamificationError> {
        if !(0..=MAX_SIMULATED_DAYS).contains(&cmd.days) {
            return Err(ValidationError::out_of_range("days", 0, MAX_SIMULATED_DAYS, cmd.days).into());
        }
        if !self.users.set_streak(&cmd.user_id, cmd.days as u32).await? {
            return Err(GamificationError::UserNotFound(cmd.user_id));
        }

        let newly_unlocked = self
            .dispatcher
            .evaluate(EvaluateCommand {
                user_id: cmd.user_id,
                event_type: TriggerKind::Streak.to_string(),
                payload: None,
            })
            .await?;

        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or(GamificationError::UserNotFound(cmd.user_id))?;

        Ok(SimulateStreakResult {
            streak_count: user.streak_count,
            best_streak: user.best_streak,
            newly_unlocked,
        })
    }
}
