//! Domain logic for the ALRCF association backend.
//!
//! Pure, I/O-free building blocks shared by the persistence and HTTP layers:
//!
//! - [`types`] -- shared type aliases (`DbId`, `Timestamp`).
//! - [`roles`] -- well-known role name constants.
//! - [`error`] -- the [`error::CoreError`] taxonomy.
//! - [`admin_guard`] -- the "at least one active admin" invariant checks.
//! - [`announcements`] -- announcement validation and moderation rules.

pub mod admin_guard;
pub mod announcements;
pub mod error;
pub mod roles;
pub mod types;
