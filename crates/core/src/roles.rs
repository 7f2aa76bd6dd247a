//! Well-known role name constants.
//!
//! These must match the `role` CHECK constraint in the users migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ADHERENT: &str = "adherent";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_ADHERENT];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
