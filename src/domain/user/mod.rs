//! User module - Accounts with streak and XP counters.

mod aggregate;
mod errors;

pub use aggregate::{StreakUpdate, User};
pub use errors::UserError;
