//! Route definitions for the `/admin` resource (admin only).

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users       -> list all accounts
/// PUT    /users       -> update role/activation (guarded)
/// DELETE /users?id=   -> hard delete (never self)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(admin::list_users)
            .put(admin::update_user)
            .delete(admin::delete_user),
    )
}
