//! Incident log repository port (append-only).
//!
//! A real incident and the streak break it causes are one write:
//! [`IncidentLogRepository::record_incident`] stores the log and zeroes the
//! author's current streak together, or does neither.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::incident::{IncidentLog, IncidentTotals};

#[async_trait]
pub trait IncidentLogRepository: Send + Sync {
    /// Append a log entry without touching the author's streak.
    async fn append(&self, log: &IncidentLog) -> Result<(), DomainError>;

    /// Append a log entry and reset the author's current streak, atomically.
    ///
    /// Returns false if the author does not exist (nothing is written).
    async fn record_incident(&self, log: &IncidentLog) -> Result<bool, DomainError>;

    /// Number of logs the user has recorded.
    async fn count_for_user(&self, user_id: &UserId) -> Result<u32, DomainError>;

    /// Logs for a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<IncidentLog>, DomainError>;

    /// Count, cost and calorie totals across all of a user's logs.
    async fn totals_for_user(&self, user_id: &UserId) -> Result<IncidentTotals, DomainError>;

    /// Logs recorded at or after `since`, oldest first.
    async fn list_since(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<Vec<IncidentLog>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incident_log_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn IncidentLogRepository) {}
    }
}
