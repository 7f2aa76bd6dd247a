//! Role-based access control extractors and helpers.
//!
//! [`RequireAdmin`] wraps [`AuthUser`] and rejects requests whose stored
//! role is not `admin`. Ownership checks happen after the resource row has
//! been fetched, via [`ensure_owner_or_admin`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use alrcf_core::error::CoreError;
use alrcf_core::types::DbId;

use super::auth::{AuthUser, CurrentUser};
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Allow the resource's owner or any admin; reject everyone else with 403.
///
/// Pure logic over the already-resolved principal and the resource's stored
/// owner id -- no I/O.
pub fn ensure_owner_or_admin(user: &CurrentUser, owner_id: DbId) -> Result<(), CoreError> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You do not have permission to modify this resource".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alrcf_core::roles::{ROLE_ADHERENT, ROLE_ADMIN};
    use assert_matches::assert_matches;

    fn user(id: DbId, role: &str) -> CurrentUser {
        CurrentUser {
            id,
            email: format!("user{id}@alrcf.fr"),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_owner_allowed() {
        assert!(ensure_owner_or_admin(&user(5, ROLE_ADHERENT), 5).is_ok());
    }

    #[test]
    fn test_admin_allowed_on_any_resource() {
        assert!(ensure_owner_or_admin(&user(1, ROLE_ADMIN), 99).is_ok());
    }

    #[test]
    fn test_other_member_forbidden() {
        let result = ensure_owner_or_admin(&user(5, ROLE_ADHERENT), 6);
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }
}
