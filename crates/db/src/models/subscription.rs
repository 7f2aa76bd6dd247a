//! Membership dues (cotisation) entity model and DTOs.
//!
//! Each row records one payment by an adherent for a period. Rows are
//! owner-scoped for members; admins see the whole ledger.

use alrcf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full subscription row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: f64,
    pub payment_date: Timestamp,
    pub period: String,
    pub status: String,
    pub payment_method: String,
    pub reference: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a dues payment.
#[derive(Debug)]
pub struct CreateSubscription {
    pub user_id: DbId,
    pub amount: f64,
    pub payment_date: Timestamp,
    pub period: String,
    pub status: String,
    pub payment_method: String,
    pub reference: Option<String>,
}
