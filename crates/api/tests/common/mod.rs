//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) over a
//! per-test database and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use alrcf_api::auth::password::hash_password;
use alrcf_api::auth::token::{encode_token, TokenConfig};
use alrcf_api::config::ServerConfig;
use alrcf_api::router::build_app_router;
use alrcf_api::state::AppState;
use alrcf_db::models::user::{CreateUser, User};
use alrcf_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:4200` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4200".to_string()],
        request_timeout_secs: 30,
        token: TokenConfig {
            session_ttl_secs: 3600,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Plaintext password shared by all fixture users.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, email: &str, role: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone: None,
        address: None,
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Mint a session token for a user, exactly as login would.
pub fn token_for(user: &User) -> String {
    encode_token(
        user.id,
        &user.email,
        &user.role,
        &test_config().token,
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send a JSON POST request without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send a JSON POST request with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send a JSON PUT request with a Bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Read a response body to completion and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body reads")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}
