//! Route definitions for the `/announcements` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::announcements;
use crate::state::AppState;

/// Routes mounted at `/announcements`.
///
/// ```text
/// POST   /create       -> submit listing (requires auth)
/// PUT    /update       -> partial update (owner or admin)
/// POST   /validate     -> approve/reject (admin only)
/// DELETE /delete?id=   -> delete (owner or admin)
/// GET    /get          -> list/fetch with visibility scoping (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(announcements::create))
        .route("/update", put(announcements::update))
        .route("/validate", post(announcements::validate))
        .route("/delete", delete(announcements::delete))
        .route("/get", get(announcements::get))
}
