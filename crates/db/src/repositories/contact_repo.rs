//! Repository for the `contact_messages` table.

use alrcf_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_message::{ContactMessage, CreateContactMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, subject, message, created_at";

/// Provides operations for contact-form messages.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// List all contact messages, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_messages ORDER BY created_at DESC");
        sqlx::query_as::<_, ContactMessage>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a contact message. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
