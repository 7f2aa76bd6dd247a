//! Handlers for the `/news` resource.
//!
//! Reading is public (drafts are admin-only); writing is admin-only.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use alrcf_core::error::CoreError;
use alrcf_core::types::DbId;
use alrcf_db::models::news::{CreateNews, News, UpdateNews};
use alrcf_db::repositories::NewsRepo;

use crate::error::AppResult;
use crate::handlers::require_field;
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /news/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Request body for `PUT /news/update`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: DbId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Query parameters for `GET /news/get` and `DELETE /news/delete`.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/news/get
///
/// Public. Non-admin callers only see published posts.
pub async fn get(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    let is_admin = user.as_ref().is_some_and(|u| u.is_admin());

    if let Some(id) = query.id {
        let post = NewsRepo::find_by_id(&state.pool, id)
            .await?
            .filter(|p| p.is_published || is_admin)
            .ok_or(CoreError::NotFound { entity: "News", id })?;
        return Ok(Json(ApiResponse::data(post)).into_response());
    }

    let posts = NewsRepo::list(&state.pool, !is_admin).await?;
    Ok(Json(ApiResponse::data(posts)).into_response())
}

/// POST /api/news/create (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<News>>)> {
    require_field(&input.title, "Title")?;
    require_field(&input.content, "Content")?;

    let post = NewsRepo::create(
        &state.pool,
        &CreateNews {
            title: input.title.trim().to_string(),
            content: input.content,
            image_url: input.image_url,
            is_published: input.is_published,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, news_id = post.id, "News post created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("News post created", post)),
    ))
}

/// PUT /api/news/update (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<UpdateRequest>,
) -> AppResult<Json<ApiResponse<News>>> {
    if let Some(ref title) = input.title {
        require_field(title, "Title")?;
    }
    if let Some(ref content) = input.content {
        require_field(content, "Content")?;
    }

    let changes = UpdateNews {
        title: input.title,
        content: input.content,
        image_url: input.image_url,
        is_published: input.is_published,
    };
    let post = NewsRepo::update(&state.pool, input.id, &changes)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "News",
            id: input.id,
        })?;

    Ok(Json(ApiResponse::with_message("News post updated", post)))
}

/// DELETE /api/news/delete?id= (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = query
        .id
        .ok_or_else(|| CoreError::Validation("News id is required".into()))?;

    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "News", id }.into());
    }

    tracing::info!(admin_id = admin.id, news_id = id, "News post deleted");
    Ok(Json(ApiResponse::message("News post deleted")))
}
