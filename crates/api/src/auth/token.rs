//! Session token encoding and decoding.
//!
//! Tokens are the wire format the existing frontend clients already speak:
//! `base64(JSON {"id", "email", "role", "exp"})`, carried as a Bearer
//! credential. The encoding carries NO signature, so any holder of the
//! scheme can mint a token for any user id. The claims are therefore
//! advisory only: authorization always re-reads the user row (see
//! [`crate::middleware::auth`]), which is what makes role revocation and
//! deactivation take effect immediately. Switching to a signed token is a
//! breaking wire change and must be coordinated with the clients.

use alrcf_core::types::DbId;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Claims embedded in every session token.
///
/// Field names are part of the client-facing wire format; do not rename.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// The user's internal database id.
    pub id: DbId,
    /// The user's email at issue time (advisory, never authoritative).
    pub email: String,
    /// The user's role at issue time (advisory, never authoritative).
    pub role: String,
    /// Expiration time (UTC Unix timestamp, seconds).
    pub exp: i64,
}

impl SessionClaims {
    /// True when the token's expiry lies in the past (server wall clock).
    pub fn is_expired(&self) -> bool {
        self.exp < chrono::Utc::now().timestamp()
    }
}

/// Configuration for session token generation.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Token lifetime in seconds (default: 24 hours).
    pub session_ttl_secs: i64,
}

/// Default session lifetime in seconds (24 hours).
const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `SESSION_TTL_SECS` | no       | `86400` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_TTL_SECS` is set but not a valid i64.
    pub fn from_env() -> Self {
        let session_ttl_secs: i64 = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_SECS.to_string())
            .parse()
            .expect("SESSION_TTL_SECS must be a valid i64");

        Self { session_ttl_secs }
    }
}

/// Error returned when a token string cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("token is not valid base64")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid claims JSON")]
    Json(#[from] serde_json::Error),
}

/// Encode a session token for the given user, expiring after
/// `config.session_ttl_secs`.
pub fn encode_token(user_id: DbId, email: &str, role: &str, config: &TokenConfig) -> String {
    let claims = SessionClaims {
        id: user_id,
        email: email.to_string(),
        role: role.to_string(),
        exp: chrono::Utc::now().timestamp() + config.session_ttl_secs,
    };
    encode_claims(&claims)
}

/// Encode an explicit claims struct. Used by [`encode_token`] and by tests
/// that need control over the expiry.
pub fn encode_claims(claims: &SessionClaims) -> String {
    let json = serde_json::to_vec(claims).expect("claims serialization cannot fail");
    BASE64.encode(json)
}

/// Decode a token string into its claims. Does not check expiry.
///
/// Fails on malformed base64, malformed JSON, or missing required fields.
pub fn decode_token(token: &str) -> Result<SessionClaims, TokenDecodeError> {
    let bytes = BASE64.decode(token)?;
    let claims: SessionClaims = serde_json::from_slice(&bytes)?;
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig {
            session_ttl_secs: 3600,
        }
    }

    #[test]
    fn test_encode_and_decode_round_trip() {
        let token = encode_token(42, "member@alrcf.fr", "adherent", &test_config());

        let claims = decode_token(&token).expect("decoding should succeed");
        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "member@alrcf.fr");
        assert_eq!(claims.role, "adherent");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wire_format_is_base64_json() {
        // The exact claim field names are a client compatibility surface.
        let token = encode_token(7, "a@b.fr", "admin", &test_config());
        let json: serde_json::Value =
            serde_json::from_slice(&BASE64.decode(&token).expect("valid base64"))
                .expect("valid JSON");

        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "a@b.fr");
        assert_eq!(json["role"], "admin");
        assert!(json["exp"].is_i64());
    }

    #[test]
    fn test_expired_token_detected() {
        let claims = SessionClaims {
            id: 1,
            email: "a@b.fr".to_string(),
            role: "adherent".to_string(),
            exp: chrono::Utc::now().timestamp() - 300,
        };
        let token = encode_claims(&claims);

        let decoded = decode_token(&token).expect("expired tokens still decode");
        assert!(decoded.is_expired());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(decode_token("not base64 at all!!!").is_err());
    }

    #[test]
    fn test_valid_base64_invalid_json_fails() {
        let token = BASE64.encode(b"definitely not json");
        assert!(matches!(
            decode_token(&token),
            Err(TokenDecodeError::Json(_))
        ));
    }

    #[test]
    fn test_missing_required_field_fails() {
        // No `exp` field.
        let token = BASE64.encode(br#"{"id": 1, "email": "a@b.fr", "role": "admin"}"#);
        assert!(matches!(
            decode_token(&token),
            Err(TokenDecodeError::Json(_))
        ));
    }
}
