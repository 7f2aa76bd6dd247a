use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health -- liveness plus a database reachability probe.
///
/// Always returns 200; orchestrators that care about the database should
/// inspect the body.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_up = alrcf_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_up { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: if db_up { "up" } else { "down" },
    })
}

/// Mount health check routes (root-level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
