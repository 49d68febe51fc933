//! Gamification handlers.
//!
//! The core is four collaborators:
//!
//! - `ProgressEvaluator` - reads a snapshot of measurable signals
//! - `UnlockEngine` - unlocks newly qualifying achievements exactly once
//! - `XpLedger` - credits XP with the level recomputed in the same write
//! - `EventDispatcher` - the entry point callers use after a state change
//!
//! The remaining handlers are read surfaces and test-harness commands.

mod event_dispatcher;
mod get_user_progress;
mod list_achievements;
mod progress_evaluator;
mod reset_progress;
mod seed_catalog;
mod simulate_logs;
mod simulate_streak;
mod unlock_achievement;
mod unlock_engine;
mod xp_ledger;

pub use event_dispatcher::{EvaluateCommand, EventDispatcher};
pub use get_user_progress::{
    GetUserProgressHandler, GetUserProgressQuery, NextAchievement, UserProgressView,
};
pub use list_achievements::{
    AchievementView, ListAchievementsHandler, ListAchievementsQuery, ListUserAchievementsHandler,
    ListUserAchievementsQuery,
};
pub use progress_evaluator::ProgressEvaluator;
pub use reset_progress::{ResetProgressCommand, ResetProgressHandler};
pub use seed_catalog::SeedCatalogHandler;
pub use simulate_logs::{SimulateLogsCommand, SimulateLogsHandler, SimulateLogsResult};
pub use simulate_streak::{SimulateStreakCommand, SimulateStreakHandler, SimulateStreakResult};
pub use unlock_achievement::{UnlockAchievementCommand, UnlockAchievementHandler};
pub use unlock_engine::{ManualUnlockResult, UnlockEngine};
pub use xp_ledger::{AwardXpCommand, XpAward, XpLedger};
