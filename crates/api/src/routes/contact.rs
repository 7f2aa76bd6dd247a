//! Route definitions for the `/contact` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST   /send         -> contact form (public)
/// GET    /get          -> list messages (admin only)
/// DELETE /delete?id=   -> delete message (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(contact::send))
        .route("/get", get(contact::get))
        .route("/delete", delete(contact::delete))
}
