//! Handlers for the `/announcements` resource: member CRUD plus admin
//! moderation.
//!
//! Status never comes from the client on create, and an owner edit of an
//! approved listing reverts it to `pending` for re-review. The revert and
//! both moderation transitions are decided inside the repository's UPDATE
//! statements against the row's own status, so handler-side reads are only
//! used for ownership checks and error shaping.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use alrcf_core::announcements::{
    validate_category, validate_description, validate_price, validate_status, validate_title,
    ACTION_APPROVE, ACTION_REJECT, DEFAULT_EXPIRY_DAYS, DEFAULT_REJECTION_REASON,
    STATUS_APPROVED, STATUS_REJECTED,
};
use alrcf_core::error::CoreError;
use alrcf_core::types::{DbId, Timestamp};
use alrcf_db::models::announcement::{
    Announcement, AnnouncementFilter, AnnouncementScope, CreateAnnouncement, UpdateAnnouncement,
};
use alrcf_db::repositories::AnnouncementRepo;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, CurrentUser, MaybeUser};
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAdmin};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /announcements/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Option<f64>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// Request body for `PUT /announcements/update`. Absent fields are left
/// untouched. `status` is honoured for admin callers only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub status: Option<String>,
}

/// Request body for `POST /announcements/validate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub id: DbId,
    pub action: String,
    pub rejection_reason: Option<String>,
}

/// Query parameters for `GET /announcements/get`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuery {
    pub id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for `DELETE /announcements/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<DbId>,
}

/// Payload confirming a created announcement.
#[derive(Debug, Serialize)]
pub struct CreatedData {
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/announcements/create
///
/// Create a listing awaiting moderation. The contact email defaults to the
/// caller's account email and the expiry to 30 days out.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedData>>)> {
    let title = input.title.trim().to_string();
    let description = input.description.trim().to_string();

    // 1. Field validation.
    validate_title(&title).map_err(CoreError::Validation)?;
    validate_description(&description).map_err(CoreError::Validation)?;
    validate_category(&input.category).map_err(CoreError::Validation)?;
    validate_price(input.price).map_err(CoreError::Validation)?;

    // 2. Defaults.
    let contact_email = input.contact_email.unwrap_or_else(|| user.email.clone());
    let expires_at = input
        .expires_at
        .unwrap_or_else(|| Utc::now() + Duration::days(DEFAULT_EXPIRY_DAYS));

    // 3. Insert; the repository pins the initial status to pending.
    let announcement = AnnouncementRepo::create(
        &state.pool,
        &CreateAnnouncement {
            user_id: user.id,
            title,
            description,
            category: input.category,
            price: input.price,
            contact_phone: input.contact_phone,
            contact_email: Some(contact_email),
            image_url: input.image_url,
            expires_at: Some(expires_at),
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        announcement_id = announcement.id,
        "Announcement created, awaiting moderation"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Announcement submitted for review",
            CreatedData {
                id: announcement.id,
            },
        )),
    ))
}

/// PUT /api/announcements/update
///
/// Partial update by the owner or an admin. An owner edit of an approved
/// listing reverts it to `pending` (decided inside the UPDATE itself); an
/// admin edit never reverts and may set `status` explicitly. A body that
/// updates nothing is a 400.
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<UpdateRequest>,
) -> AppResult<Json<ApiResponse<Announcement>>> {
    // 1. Ownership check against the current row.
    let current = AnnouncementRepo::find_by_id(&state.pool, input.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Announcement",
            id: input.id,
        })?;
    ensure_owner_or_admin(&user, current.user_id)?;

    // 2. Per-field validation on whatever is present.
    let changes = UpdateAnnouncement {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description.map(|d| d.trim().to_string()),
        category: input.category,
        price: input.price,
        contact_phone: input.contact_phone,
        contact_email: input.contact_email,
        image_url: input.image_url,
        expires_at: input.expires_at,
    };
    if let Some(ref title) = changes.title {
        validate_title(title).map_err(CoreError::Validation)?;
    }
    if let Some(ref description) = changes.description {
        validate_description(description).map_err(CoreError::Validation)?;
    }
    if let Some(ref category) = changes.category {
        validate_category(category).map_err(CoreError::Validation)?;
    }
    validate_price(changes.price).map_err(CoreError::Validation)?;

    // 3. Status is an admin-only field; silently dropped for owners.
    let status = if user.is_admin() {
        if let Some(ref status) = input.status {
            validate_status(status).map_err(CoreError::Validation)?;
        }
        input.status
    } else {
        None
    };

    if changes.is_empty() && status.is_none() {
        return Err(CoreError::Validation("No fields to update".into()).into());
    }

    // 4. Apply through the path matching the caller's role.
    let updated = if user.is_admin() {
        AnnouncementRepo::update_as_admin(&state.pool, input.id, &changes, status.as_deref())
            .await?
    } else {
        AnnouncementRepo::update_as_owner(&state.pool, input.id, &changes).await?
    };

    let updated = updated.ok_or(CoreError::NotFound {
        entity: "Announcement",
        id: input.id,
    })?;

    Ok(Json(ApiResponse::with_message(
        "Announcement updated",
        updated,
    )))
}

/// POST /api/announcements/validate
///
/// Admin moderation: approve or reject. Approving an already-approved
/// listing is an idempotent success; any other blocked transition is a 400.
pub async fn validate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<ValidateRequest>,
) -> AppResult<Json<ApiResponse<Announcement>>> {
    match input.action.as_str() {
        ACTION_APPROVE => {
            if let Some(approved) =
                AnnouncementRepo::approve(&state.pool, input.id, admin.id).await?
            {
                tracing::info!(
                    admin_id = admin.id,
                    announcement_id = approved.id,
                    "Announcement approved"
                );
                return Ok(Json(ApiResponse::with_message(
                    "Announcement approved",
                    approved,
                )));
            }
            // The conditional UPDATE matched nothing: missing row, already
            // approved (idempotent success), or a non-approvable status.
            let current = AnnouncementRepo::find_by_id(&state.pool, input.id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Announcement",
                    id: input.id,
                })?;
            if current.status == STATUS_APPROVED {
                return Ok(Json(ApiResponse::with_message(
                    "Announcement already approved",
                    current,
                )));
            }
            Err(CoreError::Validation(format!(
                "Cannot approve an announcement with status '{}'",
                current.status
            ))
            .into())
        }
        ACTION_REJECT => {
            let reason = input
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_REJECTION_REASON);

            if let Some(rejected) =
                AnnouncementRepo::reject(&state.pool, input.id, admin.id, reason).await?
            {
                tracing::info!(
                    admin_id = admin.id,
                    announcement_id = rejected.id,
                    "Announcement rejected"
                );
                return Ok(Json(ApiResponse::with_message(
                    "Announcement rejected",
                    rejected,
                )));
            }
            let current = AnnouncementRepo::find_by_id(&state.pool, input.id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Announcement",
                    id: input.id,
                })?;
            if current.status == STATUS_REJECTED {
                return Ok(Json(ApiResponse::with_message(
                    "Announcement already rejected",
                    current,
                )));
            }
            Err(CoreError::Validation(format!(
                "Cannot reject an announcement with status '{}'",
                current.status
            ))
            .into())
        }
        other => Err(CoreError::Validation(format!(
            "Unknown action '{other}'. Must be '{ACTION_APPROVE}' or '{ACTION_REJECT}'"
        ))
        .into()),
    }
}

/// DELETE /api/announcements/delete?id=
///
/// Remove a listing. Owner or admin.
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<DeleteQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = query
        .id
        .ok_or_else(|| CoreError::Validation("Announcement id is required".into()))?;

    let current = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Announcement",
            id,
        })?;
    ensure_owner_or_admin(&user, current.user_id)?;

    AnnouncementRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = user.id, announcement_id = id, "Announcement deleted");

    Ok(Json(ApiResponse::message("Announcement deleted")))
}

/// GET /api/announcements/get
///
/// List or fetch announcements. Anonymous callers see approved public
/// unexpired listings; members additionally see all of their own; admins
/// see everything and may filter by status.
pub async fn get(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<GetQuery>,
) -> AppResult<Response> {
    let scope = scope_for(user.as_ref());

    // Single-row fetch applies the same visibility as listing.
    if let Some(id) = query.id {
        let announcement = AnnouncementRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Announcement",
                id,
            })?;
        if !visible_in_scope(&announcement, scope) {
            return Err(CoreError::Forbidden(
                "You do not have permission to view this announcement".into(),
            )
            .into());
        }
        return Ok(Json(ApiResponse::data(announcement)).into_response());
    }

    // The status filter is an admin-only lever; ignored for everyone else.
    let status = match scope {
        AnnouncementScope::Admin => query.status,
        _ => None,
    };
    let filter = AnnouncementFilter {
        user_id: query.user_id,
        category: query.category,
        status,
    };

    let announcements = AnnouncementRepo::list(&state.pool, scope, &filter).await?;
    Ok(Json(ApiResponse::data(announcements)).into_response())
}

/// Map the resolved identity to a visibility scope.
fn scope_for(user: Option<&CurrentUser>) -> AnnouncementScope {
    match user {
        Some(u) if u.is_admin() => AnnouncementScope::Admin,
        Some(u) => AnnouncementScope::Member(u.id),
        None => AnnouncementScope::Public,
    }
}

/// Row-level counterpart of the list queries' visibility predicates.
fn visible_in_scope(announcement: &Announcement, scope: AnnouncementScope) -> bool {
    match scope {
        AnnouncementScope::Admin => true,
        AnnouncementScope::Member(user_id) => {
            announcement.user_id == user_id || publicly_visible(announcement)
        }
        AnnouncementScope::Public => publicly_visible(announcement),
    }
}

/// Approved, public, and not past its expiry.
fn publicly_visible(announcement: &Announcement) -> bool {
    announcement.status == STATUS_APPROVED
        && announcement.is_public
        && announcement.expires_at.map_or(true, |at| at > Utc::now())
}
