//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - single-process store backing every port
//! - `postgres` - sqlx repositories
//! - `http` - axum REST surface

pub mod http;
pub mod memory;
pub mod postgres;
