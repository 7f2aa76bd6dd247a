//! Route definitions for the `/news` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET    /get          -> list/fetch (public; drafts admin only)
/// POST   /create       -> create (admin only)
/// PUT    /update       -> update (admin only)
/// DELETE /delete?id=   -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", get(news::get))
        .route("/create", post(news::create))
        .route("/update", put(news::update))
        .route("/delete", delete(news::delete))
}
