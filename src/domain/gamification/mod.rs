//! Gamification module - Achievements, XP and levels.
//!
//! Everything here is pure: conditions are evaluated against a
//! [`ProgressSnapshot`] and the level is a function of cumulative XP.
//! Persistence and orchestration live in the ports and application layers.

mod achievement;
mod catalog;
mod condition;
mod errors;
mod level;
mod progress;
mod trigger;
mod unlock;
mod xp;

pub use achievement::{AchievementDefinition, UnlockGrant, UnlockOutcome, UserAchievement};
pub use catalog::default_catalog;
pub use condition::{BadgeCategory, UnlockCondition};
pub use errors::GamificationError;
pub use level::{calculate_level, LevelProgress, BASE_LEVEL_REQUIREMENT};
pub use progress::{ProgressSnapshot, SocialCounts};
pub use trigger::TriggerKind;
pub use unlock::{select_unlockable, sort_catalog, UnlockCandidate};
pub use xp::{XpAmount, XpBalance};
