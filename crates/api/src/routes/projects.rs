//! Route definitions for the `/projects` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /get          -> list/fetch (public; internal projects admin only)
/// POST   /create       -> create (admin only)
/// PUT    /update       -> update (admin only)
/// DELETE /delete?id=   -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", get(projects::get))
        .route("/create", post(projects::create))
        .route("/update", put(projects::update))
        .route("/delete", delete(projects::delete))
}
