//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool};

use super::{column, db_error, is_unique_violation, to_u32};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::gamification::{XpAmount, XpBalance};
use crate::domain::user::{StreakUpdate, User};
use crate::ports::UserRepository;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, streak_count, best_streak, xp, level, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.streak_count as i32)
        .bind(user.best_streak as i32)
        .bind(user.xp)
        .bind(user.level as i32)
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(ErrorCode::UserExists, "User already exists")
                    .with_detail("username", user.username.clone())
            } else {
                db_error("insert user")(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, streak_count, best_streak, xp, level, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch user"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn increment_streak(&self, id: &UserId) -> Result<Option<StreakUpdate>, DomainError> {
        // SET expressions see the pre-update row, RETURNING sees the new one.
        let row = sqlx::query(
            r#"
            WITH previous AS (
                SELECT best_streak FROM users WHERE id = $1 FOR UPDATE
            )
            UPDATE users u SET
                streak_count = u.streak_count + 1,
                best_streak = GREATEST(u.best_streak, u.streak_count + 1)
            FROM previous
            WHERE u.id = $1
            RETURNING u.streak_count, u.best_streak, previous.best_streak AS previous_best
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("increment streak"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let streak_count: i32 = column(&row, "streak_count")?;
        let best_streak: i32 = column(&row, "best_streak")?;
        let previous_best: i32 = column(&row, "previous_best")?;

        Ok(Some(StreakUpdate {
            streak_count: to_u32("streak_count", i64::from(streak_count))?,
            best_streak: to_u32("best_streak", i64::from(best_streak))?,
            is_new_record: streak_count > previous_best,
        }))
    }

    async fn set_streak(&self, id: &UserId, days: u32) -> Result<bool, DomainError> {
        let days = i32::try_from(days)
            .map_err(|_| DomainError::validation("days", "Streak length is too large"))?;
        let result = sqlx::query(
            r#"
            UPDATE users SET
                streak_count = $2,
                best_streak = GREATEST(best_streak, $2)
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(days)
        .execute(&self.pool)
        .await
        .map_err(db_error("set streak"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn credit_xp(
        &self,
        id: &UserId,
        amount: XpAmount,
    ) -> Result<Option<XpBalance>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        let Some(balance) = lock_balance(&mut *tx, id).await? else {
            return Ok(None);
        };
        let balance = balance.credited(amount);
        store_balance(&mut *tx, id, balance).await?;

        tx.commit().await.map_err(db_error("commit XP credit"))?;
        Ok(Some(balance))
    }

    async fn reset_progress(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        if lock_balance(&mut *tx, id).await?.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM user_achievements WHERE user_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete user achievements"))?;

        sqlx::query("DELETE FROM junk_food_logs WHERE user_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete incident logs"))?;

        let fresh = XpBalance::default();
        sqlx::query(
            r#"
            UPDATE users SET
                streak_count = 0,
                best_streak = 0,
                xp = $2,
                level = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(fresh.xp)
        .bind(fresh.level as i32)
        .execute(&mut *tx)
        .await
        .map_err(db_error("reset progress"))?;

        tx.commit().await.map_err(db_error("commit progress reset"))?;
        Ok(true)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Reads the balance and holds the row lock until the transaction ends.
pub(super) async fn lock_balance(
    conn: &mut PgConnection,
    id: &UserId,
) -> Result<Option<XpBalance>, DomainError> {
    let xp: Option<i64> = sqlx::query_scalar("SELECT xp FROM users WHERE id = $1 FOR UPDATE")
        .bind(id.as_uuid())
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("lock user balance"))?;

    Ok(xp.map(XpBalance::from_xp))
}

pub(super) async fn store_balance(
    conn: &mut PgConnection,
    id: &UserId,
    balance: XpBalance,
) -> Result<(), DomainError> {
    sqlx::query("UPDATE users SET xp = $2, level = $3 WHERE id = $1")
        .bind(id.as_uuid())
        .bind(balance.xp)
        .bind(balance.level as i32)
        .execute(&mut *conn)
        .await
        .map_err(db_error("update user balance"))?;

    Ok(())
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let streak_count: i32 = column(row, "streak_count")?;
    let best_streak: i32 = column(row, "best_streak")?;
    let level: i32 = column(row, "level")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(User {
        id: UserId::from_uuid(id),
        username: column(row, "username")?,
        email: column(row, "email")?,
        streak_count: to_u32("streak_count", i64::from(streak_count))?,
        best_streak: to_u32("best_streak", i64::from(best_streak))?,
        xp: column(row, "xp")?,
        level: to_u32("level", i64::from(level))?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
