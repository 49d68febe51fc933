//! Incident module - Append-only junk-food logs and their weekly summary.

mod analytics;
mod log;

pub use analytics::{window_start, DailyBreakdown, WeeklyAnalytics, ANALYTICS_WINDOW_DAYS};
pub use log::{IncidentLog, IncidentTotals, NewIncident};
