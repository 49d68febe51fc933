//! User aggregate.
//!
//! Holds the gamified counters the achievement engine reads and writes:
//! the current and best streak, cumulative XP and the cached level.
//!
//! # Invariants
//!
//! - `best_streak >= streak_count`
//! - `xp >= 0`
//! - `level == calculate_level(xp)`

use serde::Serialize;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::gamification::{LevelProgress, XpAmount, XpBalance};

const MAX_USERNAME_LEN: usize = 50;

/// Result of incrementing a streak by one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    pub streak_count: u32,
    pub best_streak: u32,
    /// True when this increment raised the best streak.
    pub is_new_record: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub streak_count: u32,
    pub best_streak: u32,
    pub xp: i64,
    pub level: u32,
    pub created_at: Timestamp,
}

impl User {
    /// Registers a new user with no progress.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if username or email is blank
    /// - `OutOfRange` if the username is longer than 50 characters
    /// - `InvalidFormat` if the email has no `@`
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into().trim().to_string();
        let email = email.into().trim().to_lowercase();

        if username.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        let len = username.chars().count();
        if len > MAX_USERNAME_LEN {
            return Err(ValidationError::out_of_range(
                "username",
                1,
                MAX_USERNAME_LEN as i64,
                len as i64,
            ));
        }
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "must contain '@'"));
        }

        let balance = XpBalance::default();
        Ok(Self {
            id,
            username,
            email,
            streak_count: 0,
            best_streak: 0,
            xp: balance.xp,
            level: balance.level,
            created_at: Timestamp::now(),
        })
    }

    /// Adds one day to the streak, raising the best streak when exceeded.
    pub fn increment_streak(&mut self) -> StreakUpdate {
        let previous_best = self.best_streak;
        self.streak_count = self.streak_count.saturating_add(1);
        self.best_streak = self.best_streak.max(self.streak_count);
        StreakUpdate {
            streak_count: self.streak_count,
            best_streak: self.best_streak,
            is_new_record: self.streak_count > previous_best,
        }
    }

    /// Breaks the current streak. The best streak is kept.
    pub fn reset_streak(&mut self) {
        self.streak_count = 0;
    }

    /// Sets the streak directly, raising the best streak if needed.
    pub fn set_streak(&mut self, days: u32) {
        self.streak_count = days;
        self.best_streak = self.best_streak.max(days);
    }

    /// Credits XP and recomputes the level.
    pub fn credit_xp(&mut self, amount: XpAmount) -> XpBalance {
        let balance = self.balance().credited(amount);
        self.xp = balance.xp;
        self.level = balance.level;
        balance
    }

    /// Clears streaks and XP back to a fresh account.
    pub fn reset_progress(&mut self) {
        let balance = XpBalance::default();
        self.streak_count = 0;
        self.best_streak = 0;
        self.xp = balance.xp;
        self.level = balance.level;
    }

    pub fn balance(&self) -> XpBalance {
        XpBalance::from_xp(self.xp)
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.xp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(UserId::new(), "sam", "Sam@Example.com").unwrap()
    }

    #[test]
    fn new_user_starts_at_level_one() {
        let user = user();
        assert_eq!(user.xp, 0);
        assert_eq!(user.level, 1);
        assert_eq!(user.streak_count, 0);
        assert_eq!(user.best_streak, 0);
        assert_eq!(user.email, "sam@example.com");
    }

    #[test]
    fn rejects_invalid_registration() {
        assert!(matches!(
            User::new(UserId::new(), " ", "a@b.c"),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(matches!(
            User::new(UserId::new(), "sam", "nope"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            User::new(UserId::new(), "x".repeat(51), "a@b.c"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn increment_reports_new_record_only_when_best_is_exceeded() {
        let mut user = user();
        user.best_streak = 2;

        let first = user.increment_streak();
        assert_eq!(first.streak_count, 1);
        assert!(!first.is_new_record);

        user.increment_streak();
        let third = user.increment_streak();
        assert_eq!(third.streak_count, 3);
        assert_eq!(third.best_streak, 3);
        assert!(third.is_new_record);
    }

    #[test]
    fn reset_streak_keeps_best() {
        let mut user = user();
        user.set_streak(5);
        user.reset_streak();
        assert_eq!(user.streak_count, 0);
        assert_eq!(user.best_streak, 5);
    }

    #[test]
    fn set_streak_never_lowers_best() {
        let mut user = user();
        user.set_streak(10);
        user.set_streak(3);
        assert_eq!(user.streak_count, 3);
        assert_eq!(user.best_streak, 10);
    }

    #[test]
    fn credit_xp_keeps_level_in_sync() {
        let mut user = user();
        let balance = user.credit_xp(XpAmount::try_new(110).unwrap());
        assert_eq!(balance, XpBalance { xp: 110, level: 2 });
        assert_eq!(user.level, 2);
        assert_eq!(user.level_progress().xp_into_level, 10);
    }

    #[test]
    fn reset_progress_clears_everything() {
        let mut user = user();
        user.set_streak(4);
        user.credit_xp(XpAmount::try_new(500).unwrap());
        user.reset_progress();
        assert_eq!(user.balance(), XpBalance::default());
        assert_eq!(user.best_streak, 0);
    }
}
