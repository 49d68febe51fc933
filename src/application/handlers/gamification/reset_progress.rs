//! ResetProgressHandler - Administrative reset of a user's gamification state.
//!
//! The only path that lowers XP. The repository applies the whole reset as
//! one write, so a failure leaves the user exactly as they were.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::gamification::GamificationError;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct ResetProgressCommand {
    pub user_id: UserId,
}

pub struct ResetProgressHandler {
    users: Arc<dyn UserRepository>,
}

impl ResetProgressHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Clears XP, level, streaks, unlock records and logs.
    pub async fn handle(&self, cmd: ResetProgressCommand) -> Result<(), GamificationError> {
        if !self.users.reset_progress(&cmd.user_id).await? {
            return Err(GamificationError::UserNotFound(cmd.user_id));
        }
        info!(user_id = %cmd.user_id, "Gamification progress reset");
        Ok(())
    }
}
