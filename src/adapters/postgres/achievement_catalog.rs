//! PostgreSQL implementation of AchievementCatalog.
//!
//! Rows keep the free-form `badge_type`, `condition` and `max_progress`
//! columns; they are parsed into an `UnlockCondition` on read.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error};
use crate::domain::foundation::{AchievementId, DomainError};
use crate::domain::gamification::{AchievementDefinition, BadgeCategory, UnlockCondition};
use crate::ports::AchievementCatalog;

#[derive(Clone)]
pub struct PostgresAchievementCatalog {
    pool: PgPool,
}

impl PostgresAchievementCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AchievementCatalog for PostgresAchievementCatalog {
    async fn list(&self) -> Result<Vec<AchievementDefinition>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, badge_type, badge_name, description, condition,
                   max_progress, xp_reward, sort_order
            FROM achievements
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list achievements"))?;

        rows.iter().map(row_to_definition).collect()
    }

    async fn find_by_id(
        &self,
        id: &AchievementId,
    ) -> Result<Option<AchievementDefinition>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, badge_type, badge_name, description, condition,
                   max_progress, xp_reward, sort_order
            FROM achievements
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch achievement"))?;

        row.as_ref().map(row_to_definition).transpose()
    }

    async fn upsert(&self, definition: &AchievementDefinition) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO achievements (
                id, badge_type, badge_name, description, condition,
                max_progress, xp_reward, sort_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                badge_type = EXCLUDED.badge_type,
                badge_name = EXCLUDED.badge_name,
                description = EXCLUDED.description,
                condition = EXCLUDED.condition,
                max_progress = EXCLUDED.max_progress,
                xp_reward = EXCLUDED.xp_reward,
                sort_order = EXCLUDED.sort_order
            "#,
        )
        .bind(definition.id.as_str())
        .bind(definition.category.as_str())
        .bind(&definition.name)
        .bind(&definition.description)
        .bind(definition.condition.metric())
        .bind(definition.max_progress())
        .bind(definition.xp_reward as i32)
        .bind(definition.sort_order)
        .execute(&self.pool)
        .await
        .map_err(db_error("upsert achievement"))?;

        Ok(())
    }
}

fn row_to_definition(row: &PgRow) -> Result<AchievementDefinition, DomainError> {
    let id: String = column(row, "id")?;
    let id = AchievementId::new(id)
        .map_err(|e| DomainError::database(format!("Invalid achievement id: {}", e)))?;
    let category = BadgeCategory::parse(&column::<String>(row, "badge_type")?);
    let metric: Option<String> = column(row, "condition")?;
    let max_progress: Option<i64> = column(row, "max_progress")?;
    let xp_reward: i32 = column(row, "xp_reward")?;

    let condition = UnlockCondition::from_parts(&category, metric.as_deref(), max_progress);
    AchievementDefinition::new(
        id,
        category,
        column::<String>(row, "badge_name")?,
        column::<String>(row, "description")?,
        condition,
        u32::try_from(xp_reward).unwrap_or(0),
        column(row, "sort_order")?,
    )
    .map_err(|e| DomainError::database(format!("Invalid achievement row: {}", e)))
}
