//! Repository for the `events` table.

use alrcf_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, event_date, location, created_at, updated_at";

/// Provides CRUD operations for association events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, event_date, location)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events, soonest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY event_date ASC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                location = COALESCE($5, location),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
