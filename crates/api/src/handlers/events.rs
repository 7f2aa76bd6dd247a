//! Handlers for the `/events` resource.
//!
//! Reading is public; writing is admin-only.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use alrcf_core::error::CoreError;
use alrcf_core::types::{DbId, Timestamp};
use alrcf_db::models::event::{CreateEvent, Event, UpdateEvent};
use alrcf_db::repositories::EventRepo;

use crate::error::AppResult;
use crate::handlers::require_field;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /events/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub location: Option<String>,
}

/// Request body for `PUT /events/update`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub location: Option<String>,
}

/// Query parameters for `GET /events/get` and `DELETE /events/delete`.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/events/get
///
/// Public. Lists upcoming-first, or fetches one by id.
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let event = EventRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Event", id })?;
        return Ok(Json(ApiResponse::data(event)).into_response());
    }

    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(events)).into_response())
}

/// POST /api/events/create (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Event>>)> {
    require_field(&input.title, "Title")?;
    require_field(&input.description, "Description")?;

    let event = EventRepo::create(
        &state.pool,
        &CreateEvent {
            title: input.title.trim().to_string(),
            description: input.description,
            event_date: input.event_date,
            location: input.location,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, event_id = event.id, "Event created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Event created", event)),
    ))
}

/// PUT /api/events/update (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<UpdateRequest>,
) -> AppResult<Json<ApiResponse<Event>>> {
    if let Some(ref title) = input.title {
        require_field(title, "Title")?;
    }
    if let Some(ref description) = input.description {
        require_field(description, "Description")?;
    }

    let changes = UpdateEvent {
        title: input.title,
        description: input.description,
        event_date: input.event_date,
        location: input.location,
    };
    let event = EventRepo::update(&state.pool, input.id, &changes)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id: input.id,
        })?;

    Ok(Json(ApiResponse::with_message("Event updated", event)))
}

/// DELETE /api/events/delete?id= (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = query
        .id
        .ok_or_else(|| CoreError::Validation("Event id is required".into()))?;

    if !EventRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Event", id }.into());
    }

    tracing::info!(admin_id = admin.id, event_id = id, "Event deleted");
    Ok(Json(ApiResponse::message("Event deleted")))
}
