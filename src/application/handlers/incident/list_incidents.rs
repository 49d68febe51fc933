//! ListIncidentsHandler - A page of a user's logs with overall totals.

use std::sync::Arc;

use futures::try_join;
use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::domain::incident::{IncidentLog, IncidentTotals};
use crate::domain::user::UserError;
use crate::ports::IncidentLogRepository;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct ListIncidentsQuery {
    pub user_id: UserId,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentPage {
    pub logs: Vec<IncidentLog>,
    pub totals: IncidentTotals,
}

pub struct ListIncidentsHandler {
    logs: Arc<dyn IncidentLogRepository>,
}

impl ListIncidentsHandler {
    pub fn new(logs: Arc<dyn IncidentLogRepository>) -> Self {
        Self { logs }
    }

    pub async fn handle(&self, query: ListIncidentsQuery) -> Result<IncidentPage, UserError> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0);

        let (logs, totals) = try_join!(
            self.logs.list_for_user(&query.user_id, limit, offset),
            self.logs.totals_for_user(&query.user_id),
        )?;
        Ok(IncidentPage { logs, totals })
    }
}
