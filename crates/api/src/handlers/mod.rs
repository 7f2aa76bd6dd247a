//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod contact;
pub mod events;
pub mod news;
pub mod projects;
pub mod reports;
pub mod subscriptions;

use alrcf_core::error::CoreError;

/// Validate an email address shape: one `@` with a non-empty local part and
/// a domain containing a dot.
///
/// Deliberately permissive. The point is to catch obvious typos, not to
/// implement RFC 5321; the unique index on `users.email` is the real gate
/// against duplicates.
pub(crate) fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid email address".into()))
    }
}

/// Reject empty-after-trim required text fields with a uniform message.
pub(crate) fn require_field(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{name} is required")))
    } else {
        Ok(())
    }
}
