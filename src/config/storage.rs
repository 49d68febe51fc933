//! Storage backend selection

use serde::Deserialize;

/// Which persistence implementation backs the ports.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Upsert the built-in achievement catalog on startup
    #[serde(default = "default_seed_catalog")]
    pub seed_catalog: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            seed_catalog: default_seed_catalog(),
        }
    }
}

fn default_seed_catalog() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults_to_seeded_memory() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert!(config.seed_catalog);
    }

    #[test]
    fn test_backend_deserialization() {
        let config: StorageConfig = serde_json::from_str(r#"{ "backend": "postgres" }"#).unwrap();
        assert_eq!(config.backend, StorageBackend::Postgres);
        assert!(config.seed_catalog);
    }
}
