//! Handlers for the `/admin/users` resource.
//!
//! Role and activation changes are the only writes that can empty the
//! active-admin set, so they all route through
//! [`UserRepo::update_role_active`], which performs the guarded update under
//! row locks. Self-deletion is rejected outright, which also means a delete
//! can never remove the last active admin (the caller is an active admin
//! distinct from the target).

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use alrcf_core::admin_guard::{can_delete_user, LAST_ADMIN_MESSAGE};
use alrcf_core::error::CoreError;
use alrcf_core::roles::validate_role;
use alrcf_core::types::DbId;
use alrcf_db::models::user::{RoleUpdateOutcome, UserResponse};
use alrcf_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/users`. Absent fields keep their current
/// values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: DbId,
    pub is_active: Option<bool>,
    pub role: Option<String>,
}

/// Query parameters for `DELETE /admin/users`.
#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    pub id: Option<DbId>,
}

/// Payload confirming a role/activation update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateData {
    pub id: DbId,
    pub is_active: bool,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/users
///
/// List every account, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::data(users)))
}

/// PUT /api/admin/users
///
/// Update a member's role and/or activation flag. Fields absent from the
/// body keep their current values; the merge happens inside the guarded
/// update, against the row state held under lock. A request that would
/// leave the association without an active administrator fails with 400,
/// whether the request was invalid to begin with or lost a race with a
/// concurrent change.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserUpdateData>>> {
    // 1. Validate the role name when one was supplied.
    if let Some(ref role) = input.role {
        validate_role(role).map_err(CoreError::Validation)?;
    }

    // 2. Guarded write. The repository locks the row, fills in absent
    //    fields from it, and re-checks the invariant before writing.
    match UserRepo::update_role_active(&state.pool, input.id, input.role.as_deref(), input.is_active)
        .await?
    {
        RoleUpdateOutcome::Updated(user) => {
            tracing::info!(
                admin_id = admin.id,
                user_id = user.id,
                role = %user.role,
                is_active = user.is_active,
                "User updated"
            );
            Ok(Json(ApiResponse::with_message(
                "User updated",
                UserUpdateData {
                    id: user.id,
                    is_active: user.is_active,
                    role: user.role,
                },
            )))
        }
        RoleUpdateOutcome::LastAdmin => {
            Err(CoreError::Validation(LAST_ADMIN_MESSAGE.into()).into())
        }
        RoleUpdateOutcome::NotFound => Err(CoreError::NotFound {
            entity: "User",
            id: input.id,
        }
        .into()),
    }
}

/// DELETE /api/admin/users?id=
///
/// Hard-delete an account. A principal may never delete its own account.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<DeleteUserQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = query
        .id
        .ok_or_else(|| CoreError::Validation("User id is required".into()))?;

    if !can_delete_user(admin.id, id) {
        return Err(CoreError::Validation("You cannot delete your own account".into()).into());
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "User",
            id,
        }
        .into());
    }

    tracing::info!(admin_id = admin.id, user_id = id, "User deleted");
    Ok(Json(ApiResponse::message("User deleted")))
}
