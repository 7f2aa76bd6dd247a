//! Handlers for the `/contact` resource.
//!
//! The contact form is open to the public; reading and deleting messages is
//! admin-only.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use alrcf_core::error::CoreError;
use alrcf_core::types::DbId;
use alrcf_db::models::contact_message::{ContactMessage, CreateContactMessage};
use alrcf_db::repositories::ContactRepo;

use crate::error::AppResult;
use crate::handlers::{require_field, validate_email};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /contact/send`.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Query parameters for `DELETE /contact/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/contact/send (public)
pub async fn send(
    State(state): State<AppState>,
    Json(input): Json<SendRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    require_field(&input.name, "Name")?;
    validate_email(&input.email)?;
    require_field(&input.subject, "Subject")?;
    require_field(&input.message, "Message")?;

    let message = ContactRepo::create(
        &state.pool,
        &CreateContactMessage {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            subject: input.subject.trim().to_string(),
            message: input.message,
        },
    )
    .await?;

    tracing::info!(message_id = message.id, "Contact message received");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Message sent")),
    ))
}

/// GET /api/contact/get (admin)
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<ContactMessage>>>> {
    let messages = ContactRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(messages)))
}

/// DELETE /api/contact/delete?id= (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<DeleteQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = query
        .id
        .ok_or_else(|| CoreError::Validation("Message id is required".into()))?;

    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Contact message",
            id,
        }
        .into());
    }

    tracing::info!(admin_id = admin.id, message_id = id, "Contact message deleted");
    Ok(Json(ApiResponse::message("Contact message deleted")))
}
