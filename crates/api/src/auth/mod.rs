//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- session token encoding/decoding.

pub mod password;
pub mod token;
