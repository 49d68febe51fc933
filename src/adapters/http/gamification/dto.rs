//! Request and response bodies for achievement and test-harness endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::gamification::ManualUnlockResult;
use crate::domain::foundation::AchievementId;
use crate::domain::gamification::LevelProgress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpResponse {
    pub xp: i64,
    pub level: u32,
    pub xp_into_level: i64,
    pub xp_for_next_level: i64,
}

impl From<LevelProgress> for XpResponse {
    fn from(progress: LevelProgress) -> Self {
        Self {
            xp: progress.total_xp,
            level: progress.level,
            xp_into_level: progress.xp_into_level,
            xp_for_next_level: progress.xp_for_next_level,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddXpRequest {
    pub amount: i64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulateStreakRequest {
    pub days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulateLogsRequest {
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub event_type: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub newly_unlocked: Vec<AchievementId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockResponse {
    pub achievement_id: AchievementId,
    pub newly_unlocked: bool,
    /// Balance after the reward; absent when it was already unlocked.
    pub xp: Option<i64>,
    pub level: Option<u32>,
}

impl From<ManualUnlockResult> for UnlockResponse {
    fn from(result: ManualUnlockResult) -> Self {
        Self {
            newly_unlocked: result.newly_unlocked(),
            xp: result.balance.map(|b| b.xp),
            level: result.balance.map(|b| b.level),
            achievement_id: result.achievement_id,
        }
    }
}
