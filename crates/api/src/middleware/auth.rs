//! Identity resolution extractors for Axum handlers.
//!
//! Resolution never trusts the token's own claims for authorization: after
//! decoding and the expiry check, the user row is re-read from storage and
//! the principal is built from that fresh row. A token that still says
//! `role: "admin"` for a since-demoted or deactivated user resolves to the
//! stored state (or to anonymous). This live lookup is the load-bearing
//! check in the session model -- the token encoding itself is unsigned.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use alrcf_core::error::CoreError;
use alrcf_core::roles::ROLE_ADMIN;
use alrcf_core::types::DbId;
use alrcf_db::repositories::UserRepo;

use crate::auth::token::decode_token;
use crate::error::AppError;
use crate::state::AppState;

/// Resolved identity for the current request.
///
/// Constructed per-request from the freshly read user row; never cached.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The user's internal database id.
    pub id: DbId,
    /// The user's stored email (not the token's claim).
    pub email: String,
    /// The user's stored role (not the token's claim).
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Optional-identity extractor for endpoints that serve both public and
/// authenticated views from the same handler.
///
/// Resolves to `MaybeUser(None)` on any authentication failure (missing
/// header, malformed token, expired token, unknown or deactivated user)
/// rather than rejecting; only a storage failure surfaces as an error.
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve(parts, state).await?))
    }
}

/// Authenticated user extracted from a Bearer token in the `Authorization`
/// header. Rejects with 401 when the request resolves to anonymous.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await? {
            Some(user) => Ok(AuthUser(user)),
            None => Err(AppError::Core(CoreError::Unauthorized(
                "Authentication required".into(),
            ))),
        }
    }
}

/// Resolve the request's Bearer token to a principal.
///
/// Order matters: header extraction, token decode, expiry check, then the
/// live row lookup. Each failure short-circuits to anonymous. One storage
/// read per call, no writes.
async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<CurrentUser>, AppError> {
    let Some(token) = bearer_token(parts) else {
        return Ok(None);
    };

    let Ok(claims) = decode_token(token) else {
        return Ok(None);
    };

    if claims.is_expired() {
        return Ok(None);
    }

    // Fresh read: the decoded role/email claims are discarded from here on.
    let Some(user) = UserRepo::find_by_id(&state.pool, claims.id).await? else {
        return Ok(None);
    };

    if !user.is_active {
        return Ok(None);
    }

    Ok(Some(CurrentUser {
        id: user.id,
        email: user.email,
        role: user.role,
    }))
}

/// Extract the token from a case-sensitive `Bearer <token>` header value.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
