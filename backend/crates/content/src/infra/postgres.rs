//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{PostBody, PostTitle};
use crate::error::{ContentError, ContentResult};
use kernel::id::{PostId, UserId};

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PostRepository for PgContentRepository {
    async fn insert(&self, post: &Post) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                author_id,
                author_name,
                title,
                body,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(&post.author_name)
        .bind(post.title.as_str())
        .bind(post.body.as_str())
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> ContentResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, author_id, author_name, title, body, created_at, updated_at
            FROM posts
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PostRow::into_post).collect()
    }

    async fn delete_by_id(&self, post_id: &PostId) -> ContentResult<u64> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    author_id: Uuid,
    author_name: String,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> ContentResult<Post> {
        let title = PostTitle::new(&self.title)
            .map_err(|e| ContentError::Internal(format!("Invalid title: {e}")))?;
        let body = PostBody::new(&self.body)
            .map_err(|e| ContentError::Internal(format!("Invalid body: {e}")))?;

        Ok(Post {
            post_id: PostId::from_uuid(self.post_id),
            author_id: UserId::from_uuid(self.author_id),
            author_name: self.author_name,
            title,
            body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
