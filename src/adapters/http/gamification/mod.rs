//! HTTP adapter for achievements, progress and the test harness.

mod dto;
mod handlers;
mod harness;
mod routes;

pub use dto::{
    AddXpRequest, EvaluateRequest, EvaluateResponse, SimulateLogsRequest, SimulateStreakRequest,
    UnlockResponse, XpResponse,
};
pub use routes::{gamification_routes, test_harness_routes};
