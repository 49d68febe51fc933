//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the ports and then hand off to the
//! `EventDispatcher`; query handlers only read.

pub mod handlers;

pub use handlers::gamification::{EventDispatcher, ProgressEvaluator, UnlockEngine, XpLedger};
