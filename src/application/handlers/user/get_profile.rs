//! GetProfileHandler - User record with level progress and log totals.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::domain::gamification::LevelProgress;
use crate::domain::incident::IncidentTotals;
use crate::domain::user::{User, UserError};
use crate::ports::{IncidentLogRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub user: User,
    pub level: LevelProgress,
    pub totals: IncidentTotals,
}

pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
    logs: Arc<dyn IncidentLogRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, logs: Arc<dyn IncidentLogRepository>) -> Self {
        Self { users, logs }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<UserProfile, UserError> {
        let user = self
            .users
            .find_by_id(&query.user_id)
            .await?
            .ok_or(UserError::NotFound(query.user_id))?;
        let totals = self.logs.totals_for_user(&query.user_id).await?;

        Ok(UserProfile {
            level: user.level_progress(),
            totals,
            user,
        })
    }
}
