//! Member report entity model and DTOs.
//!
//! Reports are owner-scoped: a member only sees their own, an admin sees all.

use alrcf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full report row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for creating a report.
#[derive(Debug)]
pub struct CreateReport {
    pub user_id: DbId,
    pub subject: String,
    pub content: String,
}
