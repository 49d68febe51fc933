//! Achievement catalog port.

use async_trait::async_trait;

use crate::domain::foundation::{AchievementId, DomainError};
use crate::domain::gamification::AchievementDefinition;

/// Read access to achievement definitions, plus seeding.
#[async_trait]
pub trait AchievementCatalog: Send + Sync {
    /// All definitions in evaluation order: `sort_order`, then id.
    ///
    /// The order must be stable across calls so unlock results are
    /// reproducible.
    async fn list(&self) -> Result<Vec<AchievementDefinition>, DomainError>;

    /// Returns `None` if the id is not in the catalog.
    async fn find_by_id(
        &self,
        id: &AchievementId,
    ) -> Result<Option<AchievementDefinition>, DomainError>;

    /// Insert or replace a definition.
    async fn upsert(&self, definition: &AchievementDefinition) -> Result<(), DomainError>;
}
