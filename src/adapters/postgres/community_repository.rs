//! PostgreSQL implementation of CommunityRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, count_column, db_error, is_foreign_key_violation, to_u32};
use crate::domain::community::{CommunityPost, PostReply};
use crate::domain::foundation::{DomainError, ErrorCode, PostId, ReplyId, Timestamp, UserId};
use crate::domain::gamification::SocialCounts;
use crate::ports::CommunityRepository;

#[derive(Clone)]
pub struct PostgresCommunityRepository {
    pool: PgPool,
}

impl PostgresCommunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityRepository for PostgresCommunityRepository {
    async fn create_post(&self, post: &CommunityPost) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO community_posts (
                id, author_id, content, is_anonymous, likes_count, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(&post.content)
        .bind(post.is_anonymous)
        .bind(post.likes_count as i32)
        .bind(post.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert post"))?;

        Ok(())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<CommunityPost>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, author_id, content, is_anonymous, likes_count, created_at
            FROM community_posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch post"))?;

        row.as_ref().map(row_to_post).transpose()
    }

    async fn list_posts(&self, limit: u32, offset: u32) -> Result<Vec<CommunityPost>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, author_id, content, is_anonymous, likes_count, created_at
            FROM community_posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list posts"))?;

        rows.iter().map(row_to_post).collect()
    }

    async fn like_post(&self, post_id: &PostId, user_id: &UserId) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("start transaction"))?;

        let exists: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM community_posts WHERE id = $1 FOR UPDATE")
                .bind(post_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("lock post"))?;
        if exists.is_none() {
            return Err(post_not_found(post_id));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert like"))?
        .rows_affected();

        if inserted > 0 {
            sqlx::query("UPDATE community_posts SET likes_count = likes_count + 1 WHERE id = $1")
                .bind(post_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(db_error("increment likes"))?;
        }

        tx.commit().await.map_err(db_error("commit like"))?;
        Ok(inserted > 0)
    }

    async fn add_reply(&self, reply: &PostReply) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO post_replies (id, post_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reply.id.as_uuid())
        .bind(reply.post_id.as_uuid())
        .bind(reply.author_id.as_uuid())
        .bind(&reply.content)
        .bind(reply.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                post_not_found(&reply.post_id)
            } else {
                db_error("insert reply")(e)
            }
        })?;

        Ok(())
    }

    async fn list_replies(&self, post_id: &PostId) -> Result<Vec<PostReply>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, post_id, author_id, content, created_at
            FROM post_replies
            WHERE post_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list replies"))?;

        rows.iter().map(row_to_reply).collect()
    }

    async fn social_counts(&self, user_id: &UserId) -> Result<SocialCounts, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM community_posts WHERE author_id = $1) AS posts_created,
                (SELECT COUNT(*) FROM post_likes WHERE user_id = $1) AS likes_given,
                (SELECT COUNT(*)
                   FROM post_likes l
                   JOIN community_posts p ON p.id = l.post_id
                  WHERE p.author_id = $1 AND l.user_id <> $1) AS likes_received,
                (SELECT COUNT(*) FROM post_replies WHERE author_id = $1) AS replies_written
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("count social activity"))?;

        Ok(SocialCounts {
            posts_created: count_column(&row, "posts_created")?,
            likes_given: count_column(&row, "likes_given")?,
            likes_received: count_column(&row, "likes_received")?,
            replies_written: count_column(&row, "replies_written")?,
        })
    }
}

fn post_not_found(post_id: &PostId) -> DomainError {
    DomainError::new(ErrorCode::PostNotFound, "Post not found")
        .with_detail("post_id", post_id.to_string())
}

fn row_to_post(row: &PgRow) -> Result<CommunityPost, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let author_id: uuid::Uuid = column(row, "author_id")?;
    let likes_count: i32 = column(row, "likes_count")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(CommunityPost {
        id: PostId::from_uuid(id),
        author_id: UserId::from_uuid(author_id),
        content: column(row, "content")?,
        is_anonymous: column(row, "is_anonymous")?,
        likes_count: to_u32("likes_count", i64::from(likes_count))?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_reply(row: &PgRow) -> Result<PostReply, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let post_id: uuid::Uuid = column(row, "post_id")?;
    let author_id: uuid::Uuid = column(row, "author_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(PostReply {
        id: ReplyId::from_uuid(id),
        post_id: PostId::from_uuid(post_id),
        author_id: UserId::from_uuid(author_id),
        content: column(row, "content")?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_not_found_carries_the_post_id() {
        let id = PostId::new();
        let err = post_not_found(&id);
        assert_eq!(err.code, ErrorCode::PostNotFound);
        assert_eq!(err.details.get("post_id"), Some(&id.to_string()));
    }
}
