//! Weekly summary of a user's incident logs.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::IncidentLog;
use crate::domain::foundation::Timestamp;

/// Length of the analytics window, counted back from now.
pub const ANALYTICS_WINDOW_DAYS: i64 = 7;

/// Start of the window ending at `now`.
pub fn window_start(now: DateTime<Utc>) -> Timestamp {
    Timestamp::from_datetime(now - Duration::days(ANALYTICS_WINDOW_DAYS))
}

/// Per-day figures, keyed by the UTC calendar date of each log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub count: u32,
    pub avg_guilt: f64,
    pub avg_regret: f64,
    pub total_cost: f64,
    pub total_calories: u64,
}

/// Totals and averages over the window, plus one entry per day that has logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyAnalytics {
    pub total_logs: u32,
    pub avg_guilt_score: f64,
    pub avg_regret_score: f64,
    pub total_cost: f64,
    pub total_calories: u64,
    /// Oldest day first. Days without logs are omitted.
    pub daily_breakdown: Vec<DailyBreakdown>,
}

#[derive(Default)]
struct Tally {
    count: u32,
    guilt: f64,
    regret: f64,
    cost: f64,
    calories: u64,
}

impl Tally {
    fn add(&mut self, log: &IncidentLog) {
        self.count = self.count.saturating_add(1);
        self.guilt += f64::from(log.guilt_rating.value());
        self.regret += f64::from(log.regret_rating.value());
        self.cost += log.estimated_cost;
        self.calories += u64::from(log.calories);
    }

    fn average(&self, sum: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            sum / f64::from(self.count)
        }
    }
}

impl WeeklyAnalytics {
    /// Aggregates the given logs. An empty slice yields all zeros.
    pub fn from_logs(logs: &[IncidentLog]) -> Self {
        let mut overall = Tally::default();
        let mut days: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
        for log in logs {
            overall.add(log);
            days.entry(log.logged_at.as_datetime().date_naive())
                .or_default()
                .add(log);
        }

        Self {
            total_logs: overall.count,
            avg_guilt_score: overall.average(overall.guilt),
            avg_regret_score: overall.average(overall.regret),
            total_cost: overall.cost,
            total_calories: overall.calories,
            daily_breakdown: days
                .into_iter()
                .map(|(date, day)| DailyBreakdown {
                    date,
                    count: day.count,
                    avg_guilt: day.average(day.guilt),
                    avg_regret: day.average(day.regret),
                    total_cost: day.cost,
                    total_calories: day.calories,
                })
                .collect(),
        }
    }
}
