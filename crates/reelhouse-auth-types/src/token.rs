//! Signed session tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors returned by [`validate_session_token`] and [`issue_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    Missing,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload for session tokens.
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | UUID string | user ID |
/// | `iat` | `iat` | seconds since epoch | issue time |
///
/// Session tokens carry no `exp`: the HS256 signature is the only integrity
/// check, and revocation happens by deleting the user.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Issue an HS256 session token whose `sub` is `user_id`.
pub fn issue_session_token(user_id: Uuid, secret: &str) -> Result<String, AuthError> {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        iat: now_secs(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)
}

/// Validate a session token and return the user id it was issued for.
///
/// Validation: HS256 signature, required claim `sub`, no expiry check.
pub fn validate_session_token(token: &str, secret: &str) -> Result<Uuid, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    data.claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)
}
