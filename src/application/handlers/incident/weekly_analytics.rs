//! WeeklyAnalyticsHandler - Summary of the last seven days of logs.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::foundation::UserId;
use crate::domain::incident::{window_start, WeeklyAnalytics};
use crate::domain::user::UserError;
use crate::ports::IncidentLogRepository;

#[derive(Debug, Clone)]
pub struct WeeklyAnalyticsQuery {
    pub user_id: UserId,
}

pub struct WeeklyAnalyticsHandler {
    logs: Arc<dyn IncidentLogRepository>,
}

impl WeeklyAnalyticsHandler {
    pub fn new(logs: Arc<dyn IncidentLogRepository>) -> Self {
        Self { logs }
    }

    pub async fn handle(&self, query: WeeklyAnalyticsQuery) -> Result<WeeklyAnalytics, UserError> {
        let since = window_start(Utc::now());
        let logs = self.logs.list_since(&query.user_id, since).await?;
        Ok(WeeklyAnalytics::from_logs(&logs))
    }
}
