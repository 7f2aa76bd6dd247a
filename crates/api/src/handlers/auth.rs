//! Handlers for the `/auth` resource (register, login, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use alrcf_core::error::CoreError;
use alrcf_core::roles::ROLE_ADHERENT;
use alrcf_db::models::user::{CreateUser, UserResponse};
use alrcf_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::auth::token::encode_token;
use crate::error::{AppError, AppResult};
use crate::handlers::{require_field, validate_email};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication payload returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: UserResponse,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a member account. The role is always `adherent`; admin accounts
/// are only ever created by promoting an existing member. Returns the new
/// user plus a session token so the client is logged in immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    // 1. Field validation.
    validate_email(&input.email)?;
    validate_password(&input.password).map_err(CoreError::Validation)?;
    require_field(&input.first_name, "First name")?;
    require_field(&input.last_name, "Last name")?;

    // 2. Hash the password before it ever reaches the database layer.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Insert. A duplicate email trips the uq_users_email constraint,
    //    which the error layer maps to 409.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_string(),
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            phone: input.phone,
            address: input.address,
            role: ROLE_ADHERENT.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "New member registered");

    // 4. Auto-login.
    let token = encode_token(user.id, &user.email, &user.role, &state.config.token);
    let data = AuthData {
        user: UserResponse::from(&user),
        token,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Registration successful", data)),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. Unknown email, wrong password, and
/// deactivated account all return the same generic 401 so the response
/// never reveals whether an email is registered.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthData>>> {
    let invalid_credentials =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    // 1. Find the account.
    let Some(user) = UserRepo::find_by_email(&state.pool, input.email.trim()).await? else {
        return Err(invalid_credentials());
    };

    // 2. Verify the password before checking activation, so both failure
    //    modes take a comparable amount of work.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid || !user.is_active {
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "Member logged in");

    let token = encode_token(user.id, &user.email, &user.role, &state.config.token);
    let data = AuthData {
        user: UserResponse::from(&user),
        token,
    };

    Ok(Json(ApiResponse::with_message("Login successful", data)))
}

/// GET /api/auth/profile
///
/// Return the authenticated member's own account (no password hash).
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let row = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.id,
        })?;

    Ok(Json(ApiResponse::data(UserResponse::from(&row))))
}
