//! PostgreSQL implementation of IncidentLogRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool};

use super::{column, count_column, db_error, to_u32};
use crate::domain::foundation::{DomainError, IncidentLogId, Rating, Timestamp, UserId};
use crate::domain::incident::{IncidentLog, IncidentTotals};
use crate::ports::IncidentLogRepository;

#[derive(Clone)]
pub struct PostgresIncidentLogRepository {
    pool: PgPool,
}

impl PostgresIncidentLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentLogRepository for PostgresIncidentLogRepository {
    async fn append(&self, log: &IncidentLog) -> Result<(), DomainError> {
        let mut conn = self.pool.acquire().await.map_err(db_error("acquire connection"))?;
        insert_log(&mut *conn, log).await
    }

    async fn record_incident(&self, log: &IncidentLog) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        let result = sqlx::query("UPDATE users SET streak_count = 0 WHERE id = $1")
            .bind(log.user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("reset streak"))?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        insert_log(&mut *tx, log).await?;

        tx.commit().await.map_err(db_error("commit incident"))?;
        Ok(true)
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM junk_food_logs WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count incident logs"))?;

        to_u32("total_logs", count)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<IncidentLog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, food_type, guilt_rating, regret_rating,
                   estimated_cost, calories, location, logged_at
            FROM junk_food_logs
            WHERE user_id = $1
            ORDER BY logged_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list incident logs"))?;

        rows.iter().map(row_to_log).collect()
    }

    async fn totals_for_user(&self, user_id: &UserId) -> Result<IncidentTotals, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_logs,
                   COALESCE(SUM(estimated_cost), 0)::DOUBLE PRECISION AS total_cost,
                   COALESCE(SUM(calories), 0)::BIGINT AS total_calories
            FROM junk_food_logs
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("sum incident logs"))?;

        let total_calories: i64 = column(&row, "total_calories")?;
        Ok(IncidentTotals {
            total_logs: count_column(&row, "total_logs")?,
            total_cost: column(&row, "total_cost")?,
            total_calories: u64::try_from(total_calories).unwrap_or(0),
        })
    }

    async fn list_since(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<Vec<IncidentLog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, food_type, guilt_rating, regret_rating,
                   estimated_cost, calories, location, logged_at
            FROM junk_food_logs
            WHERE user_id = $1 AND logged_at >= $2
            ORDER BY logged_at, id
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list recent incident logs"))?;

        rows.iter().map(row_to_log).collect()
    }
}

async fn insert_log(conn: &mut PgConnection, log: &IncidentLog) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO junk_food_logs (
            id, user_id, food_type, guilt_rating, regret_rating,
            estimated_cost, calories, location, logged_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(log.id.as_uuid())
    .bind(log.user_id.as_uuid())
    .bind(&log.food_type)
    .bind(i16::from(log.guilt_rating.value()))
    .bind(i16::from(log.regret_rating.value()))
    .bind(log.estimated_cost)
    .bind(log.calories as i32)
    .bind(log.location.as_deref())
    .bind(log.logged_at.as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(db_error("insert incident log"))?;

    Ok(())
}

fn row_to_log(row: &PgRow) -> Result<IncidentLog, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let user_id: uuid::Uuid = column(row, "user_id")?;
    let guilt: i16 = column(row, "guilt_rating")?;
    let regret: i16 = column(row, "regret_rating")?;
    let calories: i32 = column(row, "calories")?;
    let logged_at: chrono::DateTime<chrono::Utc> = column(row, "logged_at")?;

    let rating = |field: &str, value: i16| {
        Rating::try_new(field, i64::from(value))
            .map_err(|e| DomainError::database(format!("Stored {} invalid: {}", field, e)))
    };

    Ok(IncidentLog {
        id: IncidentLogId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        food_type: column(row, "food_type")?,
        guilt_rating: rating("guilt_rating", guilt)?,
        regret_rating: rating("regret_rating", regret)?,
        estimated_cost: column(row, "estimated_cost")?,
        calories: to_u32("calories", i64::from(calories))?,
        location: column(row, "location")?,
        logged_at: Timestamp::from_datetime(logged_at),
    })
}
