//! Handlers for the `/subscriptions` resource (membership dues).
//!
//! Recording a payment is an admin operation; listing is owner-scoped the
//! same way reports are.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use alrcf_core::error::CoreError;
use alrcf_core::types::{DbId, Timestamp};
use alrcf_db::models::subscription::{CreateSubscription, Subscription};
use alrcf_db::repositories::{SubscriptionRepo, UserRepo};

use crate::error::AppResult;
use crate::handlers::require_field;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /subscriptions/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub adherent_id: DbId,
    pub amount: f64,
    pub payment_date: Timestamp,
    pub period: String,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub reference: Option<String>,
}

/// Query parameters for `GET /subscriptions/get`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuery {
    pub adherent_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/subscriptions/create (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Subscription>>)> {
    require_field(&input.period, "Period")?;
    if input.amount <= 0.0 {
        return Err(CoreError::Validation("Amount must be positive".into()).into());
    }

    // The ledger only references real accounts.
    UserRepo::find_by_id(&state.pool, input.adherent_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: input.adherent_id,
        })?;

    let subscription = SubscriptionRepo::create(
        &state.pool,
        &CreateSubscription {
            user_id: input.adherent_id,
            amount: input.amount,
            payment_date: input.payment_date,
            period: input.period.trim().to_string(),
            status: input.status.unwrap_or_else(|| "paid".to_string()),
            payment_method: input.payment_method.unwrap_or_else(|| "transfer".to_string()),
            reference: input.reference,
        },
    )
    .await?;

    tracing::info!(
        admin_id = admin.id,
        user_id = subscription.user_id,
        subscription_id = subscription.id,
        "Dues payment recorded"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Dues payment recorded", subscription)),
    ))
}

/// GET /api/subscriptions/get (authenticated)
///
/// A member lists their own payments; the `adherentId` filter is honoured
/// for admins only.
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<GetQuery>,
) -> AppResult<Json<ApiResponse<Vec<Subscription>>>> {
    let subscriptions = if user.is_admin() {
        match query.adherent_id {
            Some(user_id) => SubscriptionRepo::list_for_user(&state.pool, user_id).await?,
            None => SubscriptionRepo::list_all(&state.pool).await?,
        }
    } else {
        SubscriptionRepo::list_for_user(&state.pool, user.id).await?
    };

    Ok(Json(ApiResponse::data(subscriptions)))
}
