//! Repository for the `announcements` table.
//!
//! Moderation transitions (approve/reject) and the owner-edit revert are
//! single conditional UPDATE statements: every predicate over the current
//! status is evaluated inside the statement against the row's own values,
//! never against a value the caller read earlier.

use alrcf_core::announcements::{
    STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED,
};
use alrcf_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::{
    Announcement, AnnouncementFilter, AnnouncementScope, CreateAnnouncement, UpdateAnnouncement,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, category, price, contact_phone, \
                        contact_email, image_url, status, is_public, approved_by, approved_at, \
                        rejection_reason, expires_at, created_at, updated_at";

/// SQL predicate selecting rows visible to the anonymous public.
const PUBLIC_PREDICATE: &str =
    "(status = 'approved' AND is_public = TRUE AND (expires_at IS NULL OR expires_at > NOW()))";

/// Provides CRUD and moderation operations for announcements.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// Insert a new announcement. Status always starts as `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements
                (user_id, title, description, category, price, contact_phone, contact_email,
                 image_url, status, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, '{STATUS_PENDING}', $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.contact_phone)
            .bind(&input.contact_email)
            .bind(&input.image_url)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an announcement by ID, regardless of visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List announcements visible to the given scope, with optional filters.
    pub async fn list(
        pool: &PgPool,
        scope: AnnouncementScope,
        filter: &AnnouncementFilter,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        // Build dynamic WHERE clauses in the order the binds happen below.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        match scope {
            AnnouncementScope::Public => conditions.push(PUBLIC_PREDICATE.to_string()),
            AnnouncementScope::Member(_) => {
                conditions.push(format!("({PUBLIC_PREDICATE} OR user_id = ${bind_idx})"));
                bind_idx += 1;
            }
            AnnouncementScope::Admin => {}
        }
        if filter.user_id.is_some() {
            conditions.push(format!("user_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("category = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM announcements {where_clause} ORDER BY created_at DESC"
        );

        let mut q = sqlx::query_as::<_, Announcement>(&query);
        if let AnnouncementScope::Member(user_id) = scope {
            q = q.bind(user_id);
        }
        if let Some(user_id) = filter.user_id {
            q = q.bind(user_id);
        }
        if let Some(ref category) = filter.category {
            q = q.bind(category.clone());
        }
        if let Some(ref status) = filter.status {
            q = q.bind(status.clone());
        }
        q.fetch_all(pool).await
    }

    /// Partial update on behalf of the announcement's owner.
    ///
    /// If the row is currently `approved` it atomically reverts to `pending`
    /// with cleared approval metadata; the CASE expressions read the row's own
    /// status inside the UPDATE, so a stale caller-side read cannot skip the
    /// revert. Returns `None` if no row with the given `id` exists.
    pub async fn update_as_owner(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        // All SET expressions evaluate against the pre-update row, so the
        // status CASE may come last without seeing its own assignment.
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                price = COALESCE($5, price),
                contact_phone = COALESCE($6, contact_phone),
                contact_email = COALESCE($7, contact_email),
                image_url = COALESCE($8, image_url),
                expires_at = COALESCE($9, expires_at),
                approved_by = CASE WHEN status = '{STATUS_APPROVED}' THEN NULL ELSE approved_by END,
                approved_at = CASE WHEN status = '{STATUS_APPROVED}' THEN NULL ELSE approved_at END,
                status = CASE WHEN status = '{STATUS_APPROVED}' THEN '{STATUS_PENDING}' ELSE status END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        Self::bind_update(sqlx::query_as::<_, Announcement>(&query), id, input)
            .fetch_optional(pool)
            .await
    }

    /// Partial update on behalf of an admin. No forced revert; the admin may
    /// explicitly set any valid `status` (validated by the caller).
    pub async fn update_as_admin(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
        status: Option<&str>,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                price = COALESCE($5, price),
                contact_phone = COALESCE($6, contact_phone),
                contact_email = COALESCE($7, contact_email),
                image_url = COALESCE($8, image_url),
                expires_at = COALESCE($9, expires_at),
                status = COALESCE($10, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        Self::bind_update(sqlx::query_as::<_, Announcement>(&query), id, input)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Approve an announcement: `pending`/`rejected` -> `approved`.
    ///
    /// The status predicate lives in the UPDATE itself; an already-approved
    /// row is untouched (`None`), which callers treat as an idempotent no-op.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                status = '{STATUS_APPROVED}',
                approved_by = $2,
                approved_at = NOW(),
                rejection_reason = NULL,
                updated_at = NOW()
             WHERE id = $1 AND status IN ('{STATUS_PENDING}', '{STATUS_REJECTED}')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(admin_id)
            .fetch_optional(pool)
            .await
    }

    /// Reject an announcement with a reason: `pending`/`approved` -> `rejected`.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
        reason: &str,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                status = '{STATUS_REJECTED}',
                approved_by = $2,
                approved_at = NOW(),
                rejection_reason = $3,
                updated_at = NOW()
             WHERE id = $1 AND status IN ('{STATUS_PENDING}', '{STATUS_APPROVED}')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(admin_id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Delete an announcement. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bind the shared `$1..$9` parameters of the partial-update statements.
    fn bind_update<'q>(
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, Announcement, sqlx::postgres::PgArguments>,
        id: DbId,
        input: &'q UpdateAnnouncement,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Announcement, sqlx::postgres::PgArguments> {
        query
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.contact_phone)
            .bind(&input.contact_email)
            .bind(&input.image_url)
            .bind(input.expires_at)
    }
}
