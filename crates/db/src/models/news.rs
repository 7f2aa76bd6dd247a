//! News post entity model and DTOs.

use alrcf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full news row from the `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a news post.
#[derive(Debug)]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_published: bool,
}

/// DTO for partial news updates.
#[derive(Debug, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}
