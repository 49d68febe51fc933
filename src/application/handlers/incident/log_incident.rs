//! LogIncidentHandler - Records a junk-food incident.
//!
//! Logging food breaks the current streak. The log and the streak reset are
//! one repository write. Afterwards the dispatcher runs a `log` evaluation;
//! its outcome never fails the request.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::handlers::gamification::EventDispatcher;
use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::TriggerKind;
use crate::domain::incident::{IncidentLog, NewIncident};
use crate::domain::user::UserError;
use crate::ports::IncidentLogRepository;

#[derive(Debug, Clone)]
pub struct LogIncidentCommand {
    pub user_id: UserId,
    pub incident: NewIncident,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogIncidentResult {
    pub log: IncidentLog,
    pub newly_unlocked: Vec<AchievementId>,
}

pub struct LogIncidentHandler {
    logs: Arc<dyn IncidentLogRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl LogIncidentHandler {
    pub fn new(logs: Arc<dyn IncidentLogRepository>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self { logs, dispatcher }
    }

    pub async fn handle(&self, cmd: LogIncidentCommand) -> Result<LogIncidentResult, UserError> {
        let log = IncidentLog::record(cmd.user_id, cmd.incident)?;

        if !self.logs.record_incident(&log).await? {
            return Err(UserError::NotFound(cmd.user_id));
        }
        info!(user_id = %cmd.user_id, log_id = %log.id, food_type = %log.food_type, "Incident logged");

        let newly_unlocked = self.dispatcher.dispatch(&cmd.user_id, TriggerKind::Log).await;
        Ok(LogIncidentResult {
            log,
            newly_unlocked,
        })
    }
}
