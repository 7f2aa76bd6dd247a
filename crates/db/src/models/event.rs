//! Association event entity model and DTOs.

use alrcf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event.
#[derive(Debug)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub location: Option<String>,
}

/// DTO for partial event updates.
#[derive(Debug, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub location: Option<String>,
}
