//! Repository for the `news` table.

use alrcf_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNews, News, UpdateNews};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, image_url, is_published, created_at, updated_at";

/// Provides CRUD operations for news posts.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a new news post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, content, image_url, is_published)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find a news post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List news posts, newest first. `published_only` hides drafts.
    pub async fn list(pool: &PgPool, published_only: bool) -> Result<Vec<News>, sqlx::Error> {
        let filter = if published_only {
            "WHERE is_published = TRUE"
        } else {
            ""
        };
        let query = format!("SELECT {COLUMNS} FROM news {filter} ORDER BY created_at DESC");
        sqlx::query_as::<_, News>(&query).fetch_all(pool).await
    }

    /// Update a news post. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image_url = COALESCE($4, image_url),
                is_published = COALESCE($5, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a news post. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
