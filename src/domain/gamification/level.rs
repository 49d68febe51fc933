//! Level curve: a pure function of cumulative XP.
//!
//! Level 1 requires nothing. Reaching level 2 costs 100 XP, and every later
//! level costs the previous requirement times 1.2, truncated to an integer
//! (100, 120, 144, 172, 206, ...). A level is therefore never stored as truth;
//! any persisted value is a cache of [`calculate_level`].

use serde::Serialize;

/// XP needed to go from level 1 to level 2.
pub const BASE_LEVEL_REQUIREMENT: i64 = 100;

/// Requirement for the level after one costing `current`.
///
/// `floor(current * 1.2)` computed exactly as `current * 6 / 5`.
fn next_requirement(current: i64) -> i64 {
    current
        .checked_mul(6)
        .map(|scaled| scaled / 5)
        .unwrap_or(i64::MAX)
}

/// Derives the level for a cumulative XP total.
///
/// Each cleared level's requirement is subtracted before the next one is
/// checked (100, then 120, ...), so 220 XP is level 3.
/// Negative totals are treated as zero.
pub fn calculate_level(xp: i64) -> u32 {
    LevelProgress::from_xp(xp).level
}

/// Where a user sits on the level curve, for progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub total_xp: i64,
    /// XP earned since reaching the current level.
    pub xp_into_level: i64,
    /// XP the current level costs in total before the next one.
    pub xp_for_next_level: i64,
}

impl LevelProgress {
    pub fn from_xp(xp: i64) -> Self {
        let total_xp = xp.max(0);
        let mut level = 1u32;
        let mut requirement = BASE_LEVEL_REQUIREMENT;
        let mut remaining = total_xp;

        while remaining >= requirement {
            remaining -= requirement;
            level = level.saturating_add(1);
            requirement = next_requirement(requirement);
        }

        Self {
            level,
            total_xp,
            xp_into_level: remaining,
            xp_for_next_level: requirement,
        }
    }

    /// XP still missing before the next level.
    pub fn xp_to_next_level(&self) -> i64 {
        self.xp_for_next_level - self.xp_into_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_xp_is_level_one() {
        assert_eq!(calculate_level(0), 1);
    }

    #[test]
    fn just_below_first_requirement_stays_level_one() {
        assert_eq!(calculate_level(99), 1);
    }

    #[test]
    fn first_requirement_reaches_level_two() {
        assert_eq!(calculate_level(100), 2);
    }

    #[test]
    fn second_requirement_is_one_hundred_twenty_more() {
        assert_eq!(calculate_level(219), 2);
        assert_eq!(calculate_level(100 + 120), 3);
        assert_eq!(calculate_level(100 + 120 + 144), 4);
        assert_eq!(calculate_level(100 + 120 + 144 + 172), 5);
    }

    #[test]
    fn requirements_truncate_after_each_step() {
        let mut requirement = BASE_LEVEL_REQUIREMENT;
        let mut seen = vec![requirement];
        for _ in 0..5 {
            requirement = next_requirement(requirement);
            seen.push(requirement);
        }
        assert_eq!(seen, vec![100, 120, 144, 172, 206, 247]);
    }

    #[test]
    fn negative_xp_is_clamped() {
        assert_eq!(calculate_level(-50), 1);
        assert_eq!(LevelProgress::from_xp(-50).total_xp, 0);
    }

    #[test]
    fn progress_reports_position_inside_level() {
        let progress = LevelProgress::from_xp(110);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.xp_into_level, 10);
        assert_eq!(progress.xp_for_next_level, 120);
        assert_eq!(progress.xp_to_next_level(), 110);
    }

    #[test]
    fn huge_totals_terminate() {
        assert!(calculate_level(i64::MAX) > 100);
    }

    proptest! {
        #[test]
        fn level_is_monotonic_in_xp(a in 0i64..5_000_000, b in 0i64..5_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(calculate_level(lo) <= calculate_level(hi));
        }

        #[test]
        fn progress_is_consistent_with_level(xp in 0i64..5_000_000) {
            let progress = LevelProgress::from_xp(xp);
            prop_assert_eq!(progress.level, calculate_level(xp));
            prop_assert!(progress.xp_into_level >= 0);
            prop_assert!(progress.xp_into_level < progress.xp_for_next_level);
        }
    }
}
