//! Repository for the `users` table.
//!
//! Role/activation updates go through [`UserRepo::update_role_active`], which
//! holds row locks on the active-admin set for the duration of the
//! check-then-write so the "at least one active admin" invariant cannot be
//! raced by concurrent writers on other rows.

use alrcf_core::admin_guard;
use alrcf_core::roles::ROLE_ADMIN;
use alrcf_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::user::{CreateUser, RoleUpdateOutcome, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, address, \
                        role, is_active, created_at, updated_at";

/// Minimal projection used inside the guarded update transaction.
#[derive(Debug, FromRow)]
struct LockedUser {
    id: DbId,
    role: String,
    is_active: bool,
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, phone, address, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user's role and/or activation flag, enforcing the
    /// last-active-admin invariant. A `None` field keeps the value the target
    /// row holds at lock time, so a role-only request can never write back a
    /// stale activation flag (or vice versa).
    ///
    /// The transaction locks, in a single deterministic-order statement, the
    /// target row and every currently-active admin row. Locked rows are
    /// re-read at their latest committed state, so of two concurrent demotions
    /// of the last two admins exactly one commits and the other observes a
    /// zero count and returns [`RoleUpdateOutcome::LastAdmin`].
    pub async fn update_role_active(
        pool: &PgPool,
        id: DbId,
        new_role: Option<&str>,
        new_active: Option<bool>,
    ) -> Result<RoleUpdateOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the target plus the active-admin set. ORDER BY id keeps the
        // lock acquisition order identical across concurrent transactions.
        let locked = sqlx::query_as::<_, LockedUser>(
            "SELECT id, role, is_active FROM users
             WHERE id = $1 OR (role = $2 AND is_active = TRUE)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(id)
        .bind(ROLE_ADMIN)
        .fetch_all(&mut *tx)
        .await?;

        let Some(target) = locked.iter().find(|u| u.id == id) else {
            return Ok(RoleUpdateOutcome::NotFound);
        };

        // Absent fields merge from the locked row, not from any earlier read.
        let new_role = new_role.unwrap_or(&target.role);
        let new_active = new_active.unwrap_or(target.is_active);

        if admin_guard::update_needs_guard(&target.role, new_role, new_active) {
            let other_active_admins = locked
                .iter()
                .filter(|u| u.id != id && u.role == ROLE_ADMIN && u.is_active)
                .count() as i64;

            let demotion_ok = admin_guard::can_demote(&target.role, new_role, other_active_admins);
            let deactivation_ok = admin_guard::can_deactivate(
                &target.role,
                target.is_active,
                new_active,
                other_active_admins,
            );
            if !demotion_ok || !deactivation_ok {
                // Dropping the transaction releases the locks.
                return Ok(RoleUpdateOutcome::LastAdmin);
            }
        }

        let query = format!(
            "UPDATE users SET role = $2, is_active = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(new_role)
            .bind(new_active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(RoleUpdateOutcome::Updated(user))
    }

    /// Hard-delete a user. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
