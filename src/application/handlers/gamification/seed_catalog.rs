//! SeedCatalogHandler - Writes the built-in catalog into storage at startup.

use std::sync::Arc;

use tracing::info;

use crate::domain::gamification::{default_catalog, GamificationError};
use crate::ports::AchievementCatalog;

pub struct SeedCatalogHandler {
    catalog: Arc<dyn AchievementCatalog>,
}

impl SeedCatalogHandler {
    pub fn new(catalog: Arc<dyn AchievementCatalog>) -> Self {
        Self { catalog }
    }

    /// Upserts every built-in definition. Returns how many were written.
    pub async fn handle(&self) -> Result<usize, GamificationError> {
        let definitions = default_catalog()?;
        for definition in &definitions {
            self.catalog.upsert(definition).await?;
        }
        info!(count = definitions.len(), "Achievement catalog seeded");
        Ok(definitions.len())
    }
}
