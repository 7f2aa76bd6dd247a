//! Handlers for the `/reports` resource.
//!
//! Reports are owner-scoped: members create and list their own, admins see
//! everything and may narrow to a single member.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use alrcf_core::types::DbId;
use alrcf_db::models::report::{CreateReport, Report};
use alrcf_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::handlers::require_field;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /reports/create`.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub subject: String,
    pub content: String,
}

/// Query parameters for `GET /reports/get`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuery {
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/reports/create (authenticated)
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Report>>)> {
    require_field(&input.subject, "Subject")?;
    require_field(&input.content, "Content")?;

    let report = ReportRepo::create(
        &state.pool,
        &CreateReport {
            user_id: user.id,
            subject: input.subject.trim().to_string(),
            content: input.content,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, report_id = report.id, "Report submitted");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Report submitted", report)),
    ))
}

/// GET /api/reports/get (authenticated)
///
/// A member lists their own reports; the `userId` filter is honoured for
/// admins only.
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<GetQuery>,
) -> AppResult<Json<ApiResponse<Vec<Report>>>> {
    let reports = if user.is_admin() {
        match query.user_id {
            Some(user_id) => ReportRepo::list_for_user(&state.pool, user_id).await?,
            None => ReportRepo::list_all(&state.pool).await?,
        }
    } else {
        ReportRepo::list_for_user(&state.pool, user.id).await?
    };

    Ok(Json(ApiResponse::data(reports)))
}
