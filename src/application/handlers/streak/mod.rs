//! Streak handlers.

mod increment_streak;

pub use increment_streak::{IncrementStreakCommand, IncrementStreakHandler, IncrementStreakResult};
