//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the persistence gateway. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `UserRepository` - Users with atomic streak and XP updates
//! - `IncidentLogRepository` - Append-only junk-food logs
//! - `AchievementCatalog` - Achievement definitions in evaluation order
//! - `UserAchievementRepository` - Unlock records with atomic insert-if-absent
//! - `CommunityRepository` - Posts, likes, replies and social counts

mod achievement_catalog;
mod community_repository;
mod incident_log_repository;
mod user_achievement_repository;
mod user_repository;

pub use achievement_catalog::AchievementCatalog;
pub use community_repository::CommunityRepository;
pub use incident_log_repository::IncidentLogRepository;
pub use user_achievement_repository::UserAchievementRepository;
pub use user_repository::UserRepository;
