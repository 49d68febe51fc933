//! Configuration error types

use thiserror::Error;

/// Failure to read the environment into [`super::AppConfig`].
#[derive(Debug, Error)]
#[error("Could not load configuration: {0}")]
pub struct ConfigError(#[from] config::ConfigError);

/// A loaded value that the server cannot run with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("Port 0 is not allowed")]
    InvalidPort,

    #[error("Host {0:?} is not an IP address")]
    InvalidBindAddress(String),

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Database URL must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("Database min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Database pool may not exceed 100 connections")]
    PoolSizeTooLarge,

    #[error("The gamification test harness cannot be enabled in production")]
    TestHarnessInProduction,
}
