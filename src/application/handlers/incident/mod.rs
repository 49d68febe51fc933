//! Incident log handlers.

mod list_incidents;
mod log_incident;
mod weekly_analytics;

pub use list_incidents::{IncidentPage, ListIncidentsHandler, ListIncidentsQuery};
pub use log_incident::{LogIncidentCommand, LogIncidentHandler, LogIncidentResult};
pub use weekly_analytics::{WeeklyAnalyticsHandler, WeeklyAnalyticsQuery};
