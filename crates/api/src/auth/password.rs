//! Password hashing and the account password policy.
//!
//! Member passwords are stored as Argon2id PHC strings; the salt is drawn
//! from [`OsRng`] per hash and the parameters travel inside the string, so
//! verification needs no out-of-band configuration. The policy checks run
//! on the plaintext before it is ever hashed.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum accepted password length for member accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a plaintext password against a stored PHC string.
///
/// A mismatch is `Ok(false)`; `Err` is reserved for malformed hashes and
/// other operational failures, so callers can map it to a 500 instead of a
/// login rejection.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Apply the account password policy to a candidate plaintext.
///
/// Today the policy is length-only ([`MIN_PASSWORD_LENGTH`] bytes). The
/// message is user-facing and ends up in the 400 envelope verbatim.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_and_is_salted() {
        let hash = hash_password("mot-de-passe-solide").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify_password("mot-de-passe-solide", &hash).expect("verify should succeed"));

        // A fresh salt every time: hashing twice never repeats.
        let again = hash_password("mot-de-passe-solide").expect("hashing should succeed");
        assert_ne!(hash, again);
    }

    #[test]
    fn test_wrong_password_is_a_clean_mismatch() {
        let hash = hash_password("le-vrai").expect("hashing should succeed");
        let verified = verify_password("le-faux", &hash).expect("verify should succeed");
        assert!(!verified);
    }

    #[test]
    fn test_garbage_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_policy_boundary() {
        assert!(validate_password("1234567").is_err(), "7 bytes is too short");
        assert!(validate_password("12345678").is_ok(), "8 bytes is the minimum");

        let msg = validate_password("short").unwrap_err();
        assert!(
            msg.contains("at least 8 characters"),
            "message should state the minimum"
        );
    }
}
