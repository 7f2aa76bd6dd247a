//! Authentication and authorization extractors.
//!
//! - [`auth::MaybeUser`] -- Resolves the Bearer token to an optional principal.
//! - [`auth::AuthUser`] -- Requires an authenticated principal (401 otherwise).
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role (403 otherwise).
//! - [`rbac::ensure_owner_or_admin`] -- Per-resource ownership check.

pub mod auth;
pub mod rbac;
