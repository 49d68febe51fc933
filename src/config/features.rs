//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Mount the `/api/test/gamification` routes
    #[serde(default)]
    pub enable_test_harness: bool,
}
