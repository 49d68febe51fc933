//! Achievement definitions and per-user unlock records.

use serde::Serialize;

use super::{BadgeCategory, UnlockCondition, XpAmount, XpBalance};
use crate::domain::foundation::{AchievementId, Timestamp, UserId, ValidationError};

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub id: AchievementId,
    pub category: BadgeCategory,
    pub name: String,
    pub description: String,
    pub condition: UnlockCondition,
    pub xp_reward: u32,
    /// Position in the catalog; evaluation walks entries in this order.
    pub sort_order: i32,
}

impl AchievementDefinition {
    pub fn new(
        id: AchievementId,
        category: BadgeCategory,
        name: impl Into<String>,
        description: impl Into<String>,
        condition: UnlockCondition,
        xp_reward: u32,
        sort_order: i32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("badge_name"));
        }
        Ok(Self {
            id,
            category,
            name,
            description: description.into(),
            condition,
            xp_reward,
            sort_order,
        })
    }

    /// Threshold the condition compares against, if any.
    pub fn max_progress(&self) -> Option<i64> {
        self.condition.threshold()
    }

    /// Reward as a creditable amount; `None` for zero-XP badges.
    pub fn reward(&self) -> Option<XpAmount> {
        XpAmount::try_new(i64::from(self.xp_reward)).ok()
    }
}

/// Permanent record that a user unlocked an achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAchievement {
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub unlocked_at: Timestamp,
    /// Measured progress when the unlock happened.
    pub progress: u32,
}

/// Request to persist one unlock together with its XP reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockGrant {
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub progress: u32,
    pub xp_reward: Option<XpAmount>,
    pub unlocked_at: Timestamp,
}

impl UnlockGrant {
    pub fn new(user_id: UserId, achievement: &AchievementDefinition, progress: u32) -> Self {
        Self {
            user_id,
            achievement_id: achievement.id.clone(),
            progress,
            xp_reward: achievement.reward(),
            unlocked_at: Timestamp::now(),
        }
    }

    pub fn record(&self) -> UserAchievement {
        UserAchievement {
            user_id: self.user_id,
            achievement_id: self.achievement_id.clone(),
            unlocked_at: self.unlocked_at,
            progress: self.progress,
        }
    }
}

/// Result of an insert-if-absent unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// Record created and reward credited; carries the balance afterwards.
    Unlocked(XpBalance),
    /// A record already existed. Nothing was written.
    AlreadyUnlocked,
}

impl UnlockOutcome {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, UnlockOutcome::Unlocked(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_logs() -> AchievementDefinition {
        AchievementDefinition::new(
            AchievementId::new("ten_logs").unwrap(),
            BadgeCategory::Milestone,
            "Transparency",
            "Log 10 junk food items",
            UnlockCondition::TotalLogs(10),
            20,
            7,
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_name() {
        let result = AchievementDefinition::new(
            AchievementId::new("x").unwrap(),
            BadgeCategory::Milestone,
            "  ",
            "",
            UnlockCondition::TotalLogs(1),
            5,
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn max_progress_comes_from_condition() {
        assert_eq!(ten_logs().max_progress(), Some(10));
    }

    #[test]
    fn zero_reward_is_not_creditable() {
        let mut def = ten_logs();
        def.xp_reward = 0;
        assert!(def.reward().is_none());
    }

    #[test]
    fn grant_carries_reward_and_progress() {
        let user_id = UserId::new();
        let grant = UnlockGrant::new(user_id, &ten_logs(), 12);
        assert_eq!(grant.xp_reward.map(|a| a.value()), Some(20));
        let record = grant.record();
        assert_eq!(record.user_id, user_id);
        assert_eq!(record.progress, 12);
        assert_eq!(record.achievement_id.as_str(), "ten_logs");
    }
}
