//! XpLedger - Credits XP and keeps the cached level in sync.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::gamification::{calculate_level, GamificationError, XpAmount};
use crate::ports::UserRepository;

/// Command to award XP outside of an achievement unlock.
#[derive(Debug, Clone)]
pub struct AwardXpCommand {
    pub user_id: UserId,
    pub amount: i64,
    pub reason: String,
}

/// Balance after an award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XpAward {
    pub new_xp: i64,
    pub new_level: u32,
    pub leveled_up: bool,
}

pub struct XpLedger {
    users: Arc<dyn UserRepository>,
}

impl XpLedger {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Adds `amount` to the user's XP and stores the recomputed level with it.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `amount <= 0` (nothing is read or written)
    /// - `UserNotFound` if the user does not exist
    pub async fn award_xp(&self, cmd: AwardXpCommand) -> Result<XpAward, GamificationError> {
        let amount = XpAmount::try_new(cmd.amount)?;

        let balance = self
            .users
            .credit_xp(&cmd.user_id, amount)
            .await?
            .ok_or(GamificationError::UserNotFound(cmd.user_id))?;

        let previous_level = calculate_level(balance.xp.saturating_sub(amount.value()));
        info!(
            user_id = %cmd.user_id,
            amount = amount.value(),
            reason = %cmd.reason,
            xp = balance.xp,
            level = balance.level,
            "XP awarded"
        );

        Ok(XpAward {
            new_xp: balance.xp,
            new_level: balance.level,
            leveled_up: balance.level > previous_level,
        })
    }
}
