//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// POST /create   -> submit report (requires auth)
/// GET  /get      -> own reports; admin sees all (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(reports::create))
        .route("/get", get(reports::get))
}
