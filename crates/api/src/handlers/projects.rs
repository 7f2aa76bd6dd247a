//! Handlers for the `/projects` resource.
//!
//! Reading is public (internal projects are admin-only); writing is
//! admin-only.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use alrcf_core::error::CoreError;
use alrcf_core::types::{DbId, Timestamp};
use alrcf_db::models::project::{CreateProject, Project, UpdateProject};
use alrcf_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::handlers::require_field;
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
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

/// Request body for `PUT /projects/update`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: DbId,
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

/// Query parameters for `GET /projects/get` and `DELETE /projects/delete`.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects/get
///
/// Public. Non-admin callers only see projects flagged public.
pub async fn get(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    let is_admin = user.as_ref().is_some_and(|u| u.is_admin());

    if let Some(id) = query.id {
        let project = ProjectRepo::find_by_id(&state.pool, id)
            .await?
            .filter(|p| p.is_public || is_admin)
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id,
            })?;
        return Ok(Json(ApiResponse::data(project)).into_response());
    }

    let projects = ProjectRepo::list(&state.pool, !is_admin).await?;
    Ok(Json(ApiResponse::data(projects)).into_response())
}

/// POST /api/projects/create (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    require_field(&input.title, "Title")?;
    require_field(&input.description, "Description")?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            title: input.title.trim().to_string(),
            description: input.description,
            category: input.category.unwrap_or_else(|| "autre".to_string()),
            status: input.status.unwrap_or_else(|| "planning".to_string()),
            priority: input.priority.unwrap_or_else(|| "medium".to_string()),
            start_date: input.start_date,
            end_date: input.end_date,
            budget: input.budget,
            image_url: input.image_url,
            created_by: admin.id,
            assigned_to: input.assigned_to,
            progress: input.progress.unwrap_or(0),
            is_public: input.is_public.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, project_id = project.id, "Project created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Project created", project)),
    ))
}

/// PUT /api/projects/update (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<UpdateRequest>,
) -> AppResult<Json<ApiResponse<Project>>> {
    if let Some(ref title) = input.title {
        require_field(title, "Title")?;
    }
    if let Some(ref description) = input.description {
        require_field(description, "Description")?;
    }

    let changes = UpdateProject {
        title: input.title,
        description: input.description,
        category: input.category,
        status: input.status,
        priority: input.priority,
        start_date: input.start_date,
        end_date: input.end_date,
        budget: input.budget,
        image_url: input.image_url,
        assigned_to: input.assigned_to,
        progress: input.progress,
        is_public: input.is_public,
    };
    let project = ProjectRepo::update(&state.pool, input.id, &changes)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: input.id,
        })?;

    Ok(Json(ApiResponse::with_message("Project updated", project)))
}

/// DELETE /api/projects/delete?id= (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = query
        .id
        .ok_or_else(|| CoreError::Validation("Project id is required".into()))?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Project",
            id,
        }
        .into());
    }

    tracing::info!(admin_id = admin.id, project_id = id, "Project deleted");
    Ok(Json(ApiResponse::message("Project deleted")))
}
