//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for partial updates where the
//!   entity supports them
//!
//! API-facing response structs serialize with camelCase field names for the
//! existing frontend clients.

pub mod announcement;
pub mod contact_message;
pub mod event;
pub mod news;
pub mod project;
pub mod report;
pub mod subscription;
pub mod user;
