//! Association project entity model and DTOs.

use alrcf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub budget: Option<f64>,
    pub image_url: Option<String>,
    pub created_by: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub progress: i32,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub budget: Option<f64>,
    pub image_url: Option<String>,
    pub created_by: DbId,
    pub assigned_to: Option<DbId>,
    pub progress: i32,
    pub is_public: bool,
}

/// DTO for partial project updates.
#[derive(Debug, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub budget: Option<f64>,
    pub image_url: Option<String>,
    pub assigned_to: Option<DbId>,
    pub progress: Option<i32>,
    pub is_public: Option<bool>,
}
