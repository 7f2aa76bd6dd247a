pub mod admin;
pub mod announcements;
pub mod auth;
pub mod contact;
pub mod events;
pub mod health;
pub mod news;
pub mod projects;
pub mod reports;
pub mod subscriptions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 create a member account (public)
/// /auth/login                    login (public)
/// /auth/profile                  own account (requires auth)
///
/// /admin/users                   list (GET), role/activation update (PUT),
///                                delete ?id= (DELETE) -- admin only
///
/// /announcements/create          submit listing (requires auth)
/// /announcements/update          partial update (owner or admin)
/// /announcements/validate        approve/reject (admin only)
/// /announcements/delete          delete ?id= (owner or admin)
/// /announcements/get             list/fetch with visibility scoping (public)
///
/// /news/get                      list/fetch (public; drafts admin only)
/// /news/create|update|delete     admin only
///
/// /events/get                    list/fetch (public)
/// /events/create|update|delete   admin only
///
/// /projects/get                  list/fetch (public; internal admin only)
/// /projects/create|update|delete admin only
///
/// /reports/create                submit report (requires auth)
/// /reports/get                   own reports; admin sees all
///
/// /subscriptions/create          record dues payment (admin only)
/// /subscriptions/get             own payments; admin sees all
///
/// /contact/send                  contact form (public)
/// /contact/get|delete            admin only
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/announcements", announcements::router())
        .nest("/news", news::router())
        .nest("/events", events::router())
        .nest("/projects", projects::router())
        .nest("/reports", reports::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/contact", contact::router())
}
