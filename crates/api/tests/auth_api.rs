//! HTTP-level integration tests for registration, login, and the identity
//! resolver (token handling, live role lookup).

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{
    body_json, create_test_user, get, get_auth, post_json, token_for, TEST_PASSWORD,
};
use sqlx::PgPool;

use alrcf_api::auth::token::{decode_token, encode_claims, SessionClaims};

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration creates an adherent account and logs the member in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "nouveau@alrcf.fr",
        "password": "longenough1",
        "firstName": "Claire",
        "lastName": "Moreau"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["email"], "nouveau@alrcf.fr");
    assert_eq!(json["data"]["user"]["role"], "adherent");
    assert_eq!(json["data"]["user"]["isActive"], true);
    assert!(
        json["data"]["user"].get("passwordHash").is_none(),
        "password hash must never be serialized"
    );

    // The returned token must decode to the new account's claims.
    let token = json["data"]["token"].as_str().expect("token present");
    let claims = decode_token(token).expect("token decodes");
    assert_eq!(claims.email, "nouveau@alrcf.fr");
    assert_eq!(claims.role, "adherent");
}

/// Registering an already-used email returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    create_test_user(&pool, "taken@alrcf.fr", "adherent").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "taken@alrcf.fr",
        "password": "longenough1",
        "firstName": "Jean",
        "lastName": "Dupont"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

/// Malformed email and short password are both rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": "not-an-email",
        "password": "longenough1",
        "firstName": "Jean",
        "lastName": "Dupont"
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "ok@alrcf.fr",
        "password": "short",
        "firstName": "Jean",
        "lastName": "Dupont"
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns the user and a usable token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "membre@alrcf.fr", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert!(json["data"]["token"].is_string());
}

/// Wrong password, unknown email, and deactivated account all return the
/// same generic 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let user = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let inactive = create_test_user(&pool, "parti@alrcf.fr", "adherent").await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(inactive.id)
        .execute(&pool)
        .await
        .expect("deactivation succeeds");

    let cases = [
        serde_json::json!({ "email": user.email, "password": "wrong_password" }),
        serde_json::json!({ "email": "ghost@alrcf.fr", "password": TEST_PASSWORD }),
        serde_json::json!({ "email": "parti@alrcf.fr", "password": TEST_PASSWORD }),
    ];

    let mut messages = Vec::new();
    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        messages.push(body_json(response).await["message"].clone());
    }
    assert_eq!(messages[0], messages[1]);
    assert_eq!(messages[1], messages[2]);
}

// ---------------------------------------------------------------------------
// Identity resolution
// ---------------------------------------------------------------------------

/// The profile endpoint returns the caller's own row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile(pool: PgPool) {
    let user = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let token = token_for(&user);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/profile", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "membre@alrcf.fr");
    assert_eq!(json["data"]["firstName"], "Test");
}

/// Requests without a token are 401 on protected endpoints.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

/// An expired token is rejected even though it decodes cleanly.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_expired_token_rejected(pool: PgPool) {
    let user = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let token = encode_claims(&SessionClaims {
        id: user.id,
        email: user.email.clone(),
        role: user.role.clone(),
        exp: Utc::now().timestamp() - 60,
    });
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/profile", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token naming a user that no longer exists resolves to anonymous.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_for_unknown_user_rejected(pool: PgPool) {
    let token = encode_claims(&SessionClaims {
        id: 424242,
        email: "ghost@alrcf.fr".to_string(),
        role: "admin".to_string(),
        exp: Utc::now().timestamp() + 3600,
    });
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/profile", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A valid token stops working the moment the account is deactivated.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivated_user_token_rejected(pool: PgPool) {
    let user = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let token = token_for(&user);

    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .expect("deactivation succeeds");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/profile", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The token's role claim is never trusted: a token claiming `admin` for an
/// adherent account does not open admin endpoints.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stale_role_claim_ignored(pool: PgPool) {
    let user = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let forged = encode_claims(&SessionClaims {
        id: user.id,
        email: user.email.clone(),
        role: "admin".to_string(),
        exp: Utc::now().timestamp() + 3600,
    });
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/admin/users", &forged).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A demoted admin's old token carries no admin rights on the next request.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_demotion_takes_effect_immediately(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    create_test_user(&pool, "adjoint@alrcf.fr", "admin").await;
    let token = token_for(&admin);

    // Works while the account holds the role.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    sqlx::query("UPDATE users SET role = 'adherent' WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .expect("demotion succeeds");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
