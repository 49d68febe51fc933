//! PostgreSQL implementation of UserAchievementRepository.
//!
//! `unlock` is one transaction: the insert-if-absent on the
//! `(user_id, achievement_id)` unique constraint decides the winner, and only
//! the winner locks the user row and credits the reward.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::user_repository::{lock_balance, store_balance};
use super::{column, db_error, is_foreign_key_violation, to_u32};
use crate::domain::foundation::{AchievementId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::gamification::{UnlockGrant, UnlockOutcome, UserAchievement};
use crate::ports::UserAchievementRepository;

#[derive(Clone)]
pub struct PostgresUserAchievementRepository {
    pool: PgPool,
}

impl PostgresUserAchievementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserAchievementRepository for PostgresUserAchievementRepository {
    async fn unlocked_ids(&self, user_id: &UserId) -> Result<HashSet<AchievementId>, DomainError> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT achievement_id FROM user_achievements WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("fetch unlocked achievement ids"))?;

        ids.into_iter().map(parse_achievement_id).collect()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, achievement_id, unlocked_at, progress
            FROM user_achievements
            WHERE user_id = $1
            ORDER BY unlocked_at, achievement_id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list user achievements"))?;

        rows.iter().map(row_to_user_achievement).collect()
    }

    async fn unlock(&self, grant: &UnlockGrant) -> Result<UnlockOutcome, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO user_achievements (user_id, achievement_id, unlocked_at, progress)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(grant.user_id.as_uuid())
        .bind(grant.achievement_id.as_str())
        .bind(grant.unlocked_at.as_datetime())
        .bind(i32::try_from(grant.progress).unwrap_or(i32::MAX))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if !is_foreign_key_violation(&e) {
                return db_error("insert user achievement")(e);
            }
            let constraint = e.as_database_error().and_then(|db| db.constraint());
            if constraint == Some("user_achievements_achievement_id_fkey") {
                DomainError::new(ErrorCode::AchievementNotFound, "Achievement not found")
                    .with_detail("achievement_id", grant.achievement_id.to_string())
            } else {
                DomainError::new(ErrorCode::UserNotFound, "User not found")
                    .with_detail("user_id", grant.user_id.to_string())
            }
        })?
        .rows_affected();

        if inserted == 0 {
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }

        let balance = lock_balance(&mut *tx, &grant.user_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, "User not found")
                .with_detail("user_id", grant.user_id.to_string())
        })?;
        let balance = match grant.xp_reward {
            Some(reward) => {
                let credited = balance.credited(reward);
                store_balance(&mut *tx, &grant.user_id, credited).await?;
                credited
            }
            None => balance,
        };

        tx.commit().await.map_err(db_error("commit unlock"))?;
        Ok(UnlockOutcome::Unlocked(balance))
    }
}

fn parse_achievement_id(id: String) -> Result<AchievementId, DomainError> {
    AchievementId::new(id)
        .map_err(|e| DomainError::database(format!("Invalid achievement id: {}", e)))
}

fn row_to_user_achievement(row: &PgRow) -> Result<UserAchievement, DomainError> {
    let user_id: uuid::Uuid = column(row, "user_id")?;
    let unlocked_at: chrono::DateTime<chrono::Utc> = column(row, "unlocked_at")?;
    let progress: i32 = column(row, "progress")?;

    Ok(UserAchievement {
        user_id: UserId::from_uuid(user_id),
        achievement_id: parse_achievement_id(column(row, "achievement_id")?)?,
        unlocked_at: Timestamp::from_datetime(unlocked_at),
        progress: to_u32("progress", i64::from(progress))?,
    })
}
