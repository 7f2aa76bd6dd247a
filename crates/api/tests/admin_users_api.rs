//! HTTP-level integration tests for admin user management, centred on the
//! last-active-admin invariant.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, delete_auth, get_auth, put_json_auth, token_for};
use sqlx::PgPool;

use alrcf_db::models::user::RoleUpdateOutcome;
use alrcf_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Listing and RBAC
// ---------------------------------------------------------------------------

/// Admins can list every account; the listing never leaks password hashes.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/admin/users", &token_for(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json["data"].as_array().expect("data is an array");
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password_hash").is_none());
    }
}

/// Members cannot reach the admin surface.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_member_forbidden(pool: PgPool) {
    let member = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/admin/users", &token_for(&member)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Role / activation updates
// ---------------------------------------------------------------------------

/// Promoting a member to admin succeeds and is reflected in the response.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_promote_member(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let member = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "id": member.id, "role": "admin" });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], member.id);
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["isActive"], true);

    let row = UserRepo::find_by_id(&pool, member.id)
        .await
        .expect("query succeeds")
        .expect("user exists");
    assert_eq!(row.role, "admin");
}

/// Demoting the only active admin is refused with the invariant message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_demote_last_admin_refused(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "id": admin.id, "role": "adherent" });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "Cannot remove the last active administrator"
    );

    // The row is untouched.
    let row = UserRepo::find_by_id(&pool, admin.id)
        .await
        .expect("query succeeds")
        .expect("user exists");
    assert_eq!(row.role, "admin");
    assert!(row.is_active);
}

/// Deactivating the only active admin is refused the same way.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivate_last_admin_refused(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "id": admin.id, "isActive": false });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Cannot remove the last active administrator"
    );
}

/// With a second active admin present, demotion goes through.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_demote_with_backup_admin(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let other = create_test_user(&pool, "adjoint@alrcf.fr", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "id": other.id, "role": "adherent" });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "adherent");
}

/// An inactive admin does not count as backup: once the second admin is
/// deactivated, the remaining one cannot be demoted.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_admin_is_not_backup(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let other = create_test_user(&pool, "adjoint@alrcf.fr", "admin").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "id": other.id, "isActive": false });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "id": admin.id, "role": "adherent" });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Demoting and deactivating an admin in one request is still guarded.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_combined_update_guarded(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "id": admin.id, "role": "adherent", "isActive": false });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Updating a non-admin never trips the guard, even when deactivating.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_member_updates_unguarded(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let member = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "id": member.id, "isActive": false });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["isActive"], false);
}

/// Unknown target id is a 404; an invalid role name is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_bad_input(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "id": 424242, "role": "admin" });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "id": admin.id, "role": "superuser" });
    let response = put_json_auth(app, "/api/admin/users", &token_for(&admin), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Two concurrent demotions of the two remaining active admins: exactly
/// one commits, the other observes the shrunken admin set under lock and
/// is refused.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_demotions_leave_one_admin(pool: PgPool) {
    let chef = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let adjoint = create_test_user(&pool, "adjoint@alrcf.fr", "admin").await;

    let (first, second) = tokio::join!(
        UserRepo::update_role_active(&pool, chef.id, Some("adherent"), None),
        UserRepo::update_role_active(&pool, adjoint.id, Some("adherent"), None),
    );
    let outcomes = [
        first.expect("query succeeds"),
        second.expect("query succeeds"),
    ];

    let updated = outcomes
        .iter()
        .filter(|o| matches!(o, RoleUpdateOutcome::Updated(_)))
        .count();
    let refused = outcomes
        .iter()
        .filter(|o| matches!(o, RoleUpdateOutcome::LastAdmin))
        .count();
    assert_eq!(updated, 1, "exactly one demotion must win");
    assert_eq!(refused, 1, "the loser must be refused, not applied");

    let active_admins: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM users WHERE role = 'admin' AND is_active = TRUE",
    )
    .fetch_one(&pool)
    .await
    .expect("query succeeds");
    assert_eq!(active_admins, 1);
}

/// A role-only update takes the activation flag from the row as locked,
/// not from anything the caller read earlier.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_update_merges_from_locked_row(pool: PgPool) {
    let member = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;

    // The flag flips after the row was created (and possibly read).
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(member.id)
        .execute(&pool)
        .await
        .expect("query succeeds");

    let outcome = UserRepo::update_role_active(&pool, member.id, Some("admin"), None)
        .await
        .expect("query succeeds");

    let RoleUpdateOutcome::Updated(user) = outcome else {
        panic!("expected the update to apply");
    };
    assert_eq!(user.role, "admin");
    assert!(
        !user.is_active,
        "activation must be preserved from the locked row"
    );
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Deleting another account works; the row is gone afterwards.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_user(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let member = create_test_user(&pool, "membre@alrcf.fr", "adherent").await;
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/admin/users?id={}", member.id);
    let response = delete_auth(app, &uri, &token_for(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let row = UserRepo::find_by_id(&pool, member.id)
        .await
        .expect("query succeeds");
    assert!(row.is_none());
}

/// An admin may never delete their own account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_self_delete_refused(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/admin/users?id={}", admin.id);
    let response = delete_auth(app, &uri, &token_for(&admin)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let row = UserRepo::find_by_id(&pool, admin.id)
        .await
        .expect("query succeeds");
    assert!(row.is_some());
}

/// Missing id is a 400; unknown id is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_bad_input(pool: PgPool) {
    let admin = create_test_user(&pool, "chef@alrcf.fr", "admin").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/admin/users", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/admin/users?id=424242", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
