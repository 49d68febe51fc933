//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Each repository wraps a clone of one shared `PgPool`:
//! - `PostgresUserRepository` - accounts, streaks and the XP balance
//! - `PostgresIncidentLogRepository` - junk-food logs
//! - `PostgresAchievementCatalog` - catalog definitions
//! - `PostgresUserAchievementRepository` - unlock records, transactional unlock
//! - `PostgresCommunityRepository` - posts, likes and replies

mod achievement_catalog;
mod community_repository;
mod incident_log_repository;
mod user_achievement_repository;
mod user_repository;

pub use achievement_catalog::PostgresAchievementCatalog;
pub use community_repository::PostgresCommunityRepository;
pub use incident_log_repository::PostgresIncidentLogRepository;
pub use user_achievement_repository::PostgresUserAchievementRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Decode, Postgres, Row, Type};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a connection pool sized by the database configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(&config.url)
        .await
}

/// Applies the SQL files under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

// ════════════════════════════════════════════════════════════════════════════
// Shared helpers
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

pub(crate) fn column<'r, T>(row: &'r PgRow, name: &'static str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

/// Non-negative integer column narrowed to `u32`.
pub(crate) fn count_column(row: &PgRow, name: &'static str) -> Result<u32, DomainError> {
    let value: i64 = column(row, name)?;
    to_u32(name, value)
}

pub(crate) fn to_u32(name: &'static str, value: i64) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::database(format!("Column {} out of range: {}", name, value)))
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn to_u32_rejects_negative_and_oversized_values() {
        assert_eq!(to_u32("total_logs", 42).unwrap(), 42);
        assert_eq!(to_u32("total_logs", -1).unwrap_err().code, ErrorCode::DatabaseError);
        assert!(to_u32("total_logs", i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn db_error_names_the_action() {
        let err = db_error("count logs")(sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.starts_with("Failed to count logs"));
    }

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut));
    }
}
