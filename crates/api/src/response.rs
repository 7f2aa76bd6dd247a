//! Shared response envelope for API handlers.
//!
//! Every response -- success or failure -- is a
//! `{ "success": bool, "message"?: string, "data"?: ... }` object, matching
//! what the existing frontend clients parse. Use [`ApiResponse`] instead of
//! ad-hoc `serde_json::json!` literals to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

/// Standard `{ success, message?, data? }` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success with a data payload and no message.
    pub fn data(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success with both a message and a data payload.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success with a message only.
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}
