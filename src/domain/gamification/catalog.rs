//! Built-in achievement catalog used to seed empty stores.

use super::{AchievementDefinition, BadgeCategory, UnlockCondition};
use crate::domain::foundation::{AchievementId, ValidationError};

struct Seed {
    id: &'static str,
    category: BadgeCategory,
    name: &'static str,
    description: &'static str,
    metric: Option<&'static str>,
    max_progress: Option<i64>,
    xp_reward: u32,
}

fn seeds() -> Vec<Seed> {
    use BadgeCategory::*;
    vec![
        Seed { id: "first_day", category: Streak, name: "First Step", description: "Go 1 day without junk food", metric: None, max_progress: Some(1), xp_reward: 10 },
        Seed { id: "three_day_streak", category: Streak, name: "Getting Started", description: "Go 3 days without junk food", metric: None, max_progress: Some(3), xp_reward: 25 },
        Seed { id: "week_warrior", category: Streak, name: "Week Warrior", description: "Go 7 days without junk food", metric: None, max_progress: Some(7), xp_reward: 50 },
        Seed { id: "month_master", category: Streak, name: "Month Master", description: "Go 30 days without junk food", metric: None, max_progress: Some(30), xp_reward: 200 },
        Seed { id: "century_club", category: Streak, name: "Century Club", description: "Go 100 days without junk food", metric: None, max_progress: Some(100), xp_reward: 500 },
        Seed { id: "first_log", category: Milestone, name: "Honest Start", description: "Log your first junk food item", metric: None, max_progress: Some(1), xp_reward: 5 },
        Seed { id: "ten_logs", category: Milestone, name: "Transparency", description: "Log 10 junk food items", metric: None, max_progress: Some(10), xp_reward: 20 },
        Seed { id: "hundred_logs", category: Milestone, name: "Data Driven", description: "Log 100 junk food items", metric: None, max_progress: Some(100), xp_reward: 100 },
        Seed { id: "first_post", category: Social, name: "Community Member", description: "Make your first community post", metric: None, max_progress: Some(1), xp_reward: 15 },
        Seed { id: "supportive_friend", category: Social, name: "Supportive Friend", description: "Like 10 community posts", metric: Some(UnlockCondition::LIKES_GIVEN), max_progress: Some(10), xp_reward: 20 },
        Seed { id: "inspiration", category: Social, name: "Inspiration", description: "Receive 10 likes on your posts", metric: Some(UnlockCondition::LIKES_RECEIVED), max_progress: Some(10), xp_reward: 50 },
        Seed { id: "early_bird", category: Special, name: "Early Bird", description: "Log a healthy breakfast before 8 AM", metric: None, max_progress: None, xp_reward: 30 },
        Seed { id: "night_owl", category: Special, name: "Night Owl", description: "Resist late-night snacking", metric: None, max_progress: None, xp_reward: 30 },
    ]
}

/// Returns the default catalog in evaluation order.
///
/// `special` entries have no measurable condition and only unlock through a
/// manual grant.
pub fn default_catalog() -> Result<Vec<AchievementDefinition>, ValidationError> {
    seeds()
        .into_iter()
        .enumerate()
        .map(|(position, seed)| {
            let condition = UnlockCondition::from_parts(&seed.category, seed.metric, seed.max_progress);
            AchievementDefinition::new(
                AchievementId::new(seed.id)?,
                seed.category,
                seed.name,
                seed.description,
                condition,
                seed.xp_reward,
                position as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_catalog_builds() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.len(), 13);
    }

    #[test]
    fn ids_are_unique() {
        let catalog = default_catalog().unwrap();
        let ids: HashSet<_> = catalog.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn sort_order_follows_position() {
        let catalog = default_catalog().unwrap();
        assert!(catalog.windows(2).all(|w| w[0].sort_order < w[1].sort_order));
    }

    #[test]
    fn milestone_and_streak_entries_are_evaluable() {
        let catalog = default_catalog().unwrap();
        let ten_logs = catalog.iter().find(|d| d.id.as_str() == "ten_logs").unwrap();
        assert_eq!(ten_logs.condition, UnlockCondition::TotalLogs(10));
        assert_eq!(ten_logs.xp_reward, 20);

        let week = catalog.iter().find(|d| d.id.as_str() == "week_warrior").unwrap();
        assert_eq!(week.condition, UnlockCondition::CurrentStreak(7));
    }

    #[test]
    fn special_entries_are_manual_only() {
        let catalog = default_catalog().unwrap();
        let specials: Vec<_> = catalog
            .iter()
            .filter(|d| d.category == BadgeCategory::Special)
            .collect();
        assert_eq!(specials.len(), 2);
        assert!(specials.iter().all(|d| !d.condition.is_supported()));
    }
}
