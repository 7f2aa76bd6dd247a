//! Route definitions for the `/events` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /get          -> list/fetch (public)
/// POST   /create       -> create (admin only)
/// PUT    /update       -> update (admin only)
/// DELETE /delete?id=   -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", get(events::get))
        .route("/create", post(events::create))
        .route("/update", put(events::update))
        .route("/delete", delete(events::delete))
}
