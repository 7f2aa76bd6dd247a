//! Route definitions for the `/subscriptions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Routes mounted at `/subscriptions`.
///
/// ```text
/// POST /create   -> record dues payment (admin only)
/// GET  /get      -> own payments; admin sees all (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(subscriptions::create))
        .route("/get", get(subscriptions::get))
}
