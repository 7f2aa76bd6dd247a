//! Announcement entity model and DTOs.

use alrcf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full announcement row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Option<f64>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub is_public: bool,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new announcement. Status is always `pending`.
#[derive(Debug)]
pub struct CreateAnnouncement {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Option<f64>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// DTO for partial updates. Only non-`None` fields are applied.
///
/// Does not carry `status`: status changes go through the moderation
/// methods or the admin update path's explicit status argument.
#[derive(Debug, Default)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
}

impl UpdateAnnouncement {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.contact_phone.is_none()
            && self.contact_email.is_none()
            && self.image_url.is_none()
            && self.expires_at.is_none()
    }
}

/// Caller classification used to scope list queries.
#[derive(Debug, Clone, Copy)]
pub enum AnnouncementScope {
    /// Unauthenticated: approved, public, unexpired rows only.
    Public,
    /// Authenticated non-admin: public rows plus all of their own.
    Member(DbId),
    /// Admin: everything.
    Admin,
}

/// Optional list filters, combined with the visibility scope.
#[derive(Debug, Default)]
pub struct AnnouncementFilter {
    pub user_id: Option<DbId>,
    pub category: Option<String>,
    /// Only honoured for [`AnnouncementScope::Admin`] callers.
    pub status: Option<String>,
}
