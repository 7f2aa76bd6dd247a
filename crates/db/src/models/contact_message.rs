//! Contact-form message entity model and DTOs.

use alrcf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full contact message row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// DTO for creating a contact message.
#[derive(Debug)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
