//! HTTP adapter for incident logs, streaks and weekly analytics.

mod dto;
mod handlers;
mod routes;

pub use dto::{LogIncidentRequest, PageParams};
pub use routes::{analytics_routes, incident_routes, streak_routes};
