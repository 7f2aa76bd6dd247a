//! Repository for the `projects` table.

use alrcf_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, status, priority, start_date, \
                        end_date, budget, image_url, created_by, assigned_to, progress, \
                        is_public, created_at, updated_at";

/// Provides CRUD operations for association projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, category, status, priority,
                                   start_date, end_date, budget, image_url,
                                   created_by, assigned_to, progress, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(&input.image_url)
            .bind(input.created_by)
            .bind(input.assigned_to)
            .bind(input.progress)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects, newest first. `public_only` hides internal ones.
    pub async fn list(pool: &PgPool, public_only: bool) -> Result<Vec<Project>, sqlx::Error> {
        let filter = if public_only {
            "WHERE is_public = TRUE"
        } else {
            ""
        };
        let query = format!("SELECT {COLUMNS} FROM projects {filter} ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                budget = COALESCE($9, budget),
                image_url = COALESCE($10, image_url),
                assigned_to = COALESCE($11, assigned_to),
                progress = COALESCE($12, progress),
                is_public = COALESCE($13, is_public),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(&input.image_url)
            .bind(input.assigned_to)
            .bind(input.progress)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
