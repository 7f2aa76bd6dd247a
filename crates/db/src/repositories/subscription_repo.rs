//! Repository for the `subscriptions` table (membership dues ledger).
//!
//! Visibility mirrors reports: members list only their own rows, admins
//! list the whole ledger. The scoping decision belongs to the handler.

use alrcf_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::{CreateSubscription, Subscription};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, amount, payment_date, period, status, payment_method, \
                        reference, created_at, updated_at";

/// Provides operations for dues payments.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Record a dues payment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (user_id, amount, payment_date, period,
                                        status, payment_method, reference)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(input.payment_date)
            .bind(&input.period)
            .bind(&input.status)
            .bind(&input.payment_method)
            .bind(&input.reference)
            .fetch_one(pool)
            .await
    }

    /// List every payment, newest first (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions ORDER BY created_at DESC");
        sqlx::query_as::<_, Subscription>(&query).fetch_all(pool).await
    }

    /// List a single member's payments, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
