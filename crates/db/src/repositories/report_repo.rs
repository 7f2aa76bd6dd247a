//! Repository for the `reports` table.
//!
//! Visibility is owner-scoped: members list only their own rows, admins
//! list everything. The scoping decision belongs to the handler; this
//! layer just provides both queries.

use alrcf_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, subject, content, created_at";

/// Provides operations for member reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (user_id, subject, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.user_id)
            .bind(&input.subject)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List all reports, newest first (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports ORDER BY created_at DESC");
        sqlx::query_as::<_, Report>(&query).fetch_all(pool).await
    }

    /// List a single member's reports, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Report>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reports WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Report>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
