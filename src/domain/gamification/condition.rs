//! Badge categories and the closed set of unlock conditions.
//!
//! Stored catalog rows carry a free-form `badge_type`, an optional condition
//! metric name and a `max_progress` threshold. They are parsed once into an
//! [`UnlockCondition`]; anything that cannot be parsed becomes
//! [`UnlockCondition::Unsupported`], which never unlocks.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProgressSnapshot;

/// Display grouping of an achievement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Milestone,
    Streak,
    Social,
    Special,
    Challenge,
    /// Category name not known to this build.
    #[serde(untagged)]
    Other(String),
}

impl BadgeCategory {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "milestone" => BadgeCategory::Milestone,
            "streak" => BadgeCategory::Streak,
            "social" => BadgeCategory::Social,
            "special" => BadgeCategory::Special,
            "challenge" => BadgeCategory::Challenge,
            _ => BadgeCategory::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BadgeCategory::Milestone => "milestone",
            BadgeCategory::Streak => "streak",
            BadgeCategory::Social => "social",
            BadgeCategory::Special => "special",
            BadgeCategory::Challenge => "challenge",
            BadgeCategory::Other(name) => name,
        }
    }

    /// Metric a category implies when the row names none.
    fn default_metric(&self) -> Option<&'static str> {
        match self {
            BadgeCategory::Milestone => Some(UnlockCondition::TOTAL_LOGS),
            BadgeCategory::Streak => Some(UnlockCondition::CURRENT_STREAK),
            BadgeCategory::Social => Some(UnlockCondition::POSTS_CREATED),
            BadgeCategory::Special | BadgeCategory::Challenge | BadgeCategory::Other(_) => None,
        }
    }
}

impl fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What must be true of a [`ProgressSnapshot`] for an achievement to unlock.
///
/// Every measurable variant carries its own threshold and compares with `>=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockCondition {
    TotalLogs(u32),
    CurrentStreak(u32),
    BestStreak(u32),
    PostsCreated(u32),
    LikesGiven(u32),
    LikesReceived(u32),
    RepliesWritten(u32),
    /// Cannot be evaluated automatically. Only a manual grant unlocks it.
    Unsupported {
        metric: Option<String>,
        threshold: Option<i64>,
    },
}

impl UnlockCondition {
    pub const TOTAL_LOGS: &'static str = "total_logs";
    pub const CURRENT_STREAK: &'static str = "current_streak";
    pub const BEST_STREAK: &'static str = "best_streak";
    pub const POSTS_CREATED: &'static str = "posts_created";
    pub const LIKES_GIVEN: &'static str = "likes_given";
    pub const LIKES_RECEIVED: &'static str = "likes_received";
    pub const REPLIES_WRITTEN: &'static str = "replies_written";

    /// Builds a condition from the stored catalog columns.
    pub fn from_parts(category: &BadgeCategory, metric: Option<&str>, max_progress: Option<i64>) -> Self {
        let metric_name = metric
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_lowercase)
            .or_else(|| category.default_metric().map(str::to_string));

        let unsupported = || UnlockCondition::Unsupported {
            metric: metric_name.clone(),
            threshold: max_progress,
        };

        let threshold = match max_progress {
            Some(value) if value >= 1 && value <= i64::from(u32::MAX) => value as u32,
            _ => return unsupported(),
        };

        match metric_name.as_deref() {
            Some(Self::TOTAL_LOGS) => UnlockCondition::TotalLogs(threshold),
            Some(Self::CURRENT_STREAK) => UnlockCondition::CurrentStreak(threshold),
            Some(Self::BEST_STREAK) => UnlockCondition::BestStreak(threshold),
            Some(Self::POSTS_CREATED) => UnlockCondition::PostsCreated(threshold),
            Some(Self::LIKES_GIVEN) => UnlockCondition::LikesGiven(threshold),
            Some(Self::LIKES_RECEIVED) => UnlockCondition::LikesReceived(threshold),
            Some(Self::REPLIES_WRITTEN) => UnlockCondition::RepliesWritten(threshold),
            _ => unsupported(),
        }
    }

    /// Metric name as persisted in the catalog.
    pub fn metric(&self) -> Option<&str> {
        match self {
            UnlockCondition::TotalLogs(_) => Some(Self::TOTAL_LOGS),
            UnlockCondition::CurrentStreak(_) => Some(Self::CURRENT_STREAK),
            UnlockCondition::BestStreak(_) => Some(Self::BEST_STREAK),
            UnlockCondition::PostsCreated(_) => Some(Self::POSTS_CREATED),
            UnlockCondition::LikesGiven(_) => Some(Self::LIKES_GIVEN),
            UnlockCondition::LikesReceived(_) => Some(Self::LIKES_RECEIVED),
            UnlockCondition::RepliesWritten(_) => Some(Self::REPLIES_WRITTEN),
            UnlockCondition::Unsupported { metric, .. } => metric.as_deref(),
        }
    }

    /// The `max_progress` value.
    pub fn threshold(&self) -> Option<i64> {
        match self {
            UnlockCondition::TotalLogs(n)
            | UnlockCondition::CurrentStreak(n)
            | UnlockCondition::BestStreak(n)
            | UnlockCondition::PostsCreated(n)
            | UnlockCondition::LikesGiven(n)
            | UnlockCondition::LikesReceived(n)
            | UnlockCondition::RepliesWritten(n) => Some(i64::from(*n)),
            UnlockCondition::Unsupported { threshold, .. } => *threshold,
        }
    }

    /// Current measured value of the condition's metric.
    pub fn measure(&self, snapshot: &ProgressSnapshot) -> Option<u32> {
        match self {
            UnlockCondition::TotalLogs(_) => Some(snapshot.total_logs),
            UnlockCondition::CurrentStreak(_) => Some(snapshot.current_streak),
            UnlockCondition::BestStreak(_) => Some(snapshot.best_streak),
            UnlockCondition::PostsCreated(_) => Some(snapshot.social.posts_created),
            UnlockCondition::LikesGiven(_) => Some(snapshot.social.likes_given),
            UnlockCondition::LikesReceived(_) => Some(snapshot.social.likes_received),
            UnlockCondition::RepliesWritten(_) => Some(snapshot.social.replies_written),
            UnlockCondition::Unsupported { .. } => None,
        }
    }

    /// True when the snapshot satisfies the condition.
    pub fn is_met(&self, snapshot: &ProgressSnapshot) -> bool {
        match (self.measure(snapshot), self.threshold()) {
            (Some(value), Some(threshold)) => i64::from(value) >= threshold,
            _ => false,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, UnlockCondition::Unsupported { .. })
    }
}
