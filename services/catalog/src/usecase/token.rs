//! Opaque and session tokens.
//!
//! Opaque tokens (email verification, password reset) are random hex strings
//! mailed to the user. Only an HMAC-SHA256 of the plaintext is stored, and
//! verification compares MACs in constant time. Session tokens are signed
//! JWTs carrying the user id.

use anyhow::anyhow;
use hmac::{Hmac, Mac};
use rand::RngExt;
use sha2::Sha256;
use uuid::Uuid;

use reelhouse_auth_types::token::{issue_session_token, validate_session_token};

use crate::error::CatalogError;

type HmacSha256 = Hmac<Sha256>;

/// Plaintext length in hex characters (30 random bytes).
pub const OPAQUE_TOKEN_LEN: usize = 60;

const HEX_CHARSET: &[u8] = b"0123456789abcdef";

/// A freshly issued opaque token. `plaintext` goes to the user,
/// `stored_hash` to the database.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub plaintext: String,
    pub stored_hash: String,
}

#[derive(Clone)]
pub struct TokenService {
    jwt_secret: String,
    hash_secret: String,
}

impl TokenService {
    pub fn new(jwt_secret: impl Into<String>, hash_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            hash_secret: hash_secret.into(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, CatalogError> {
        HmacSha256::new_from_slice(self.hash_secret.as_bytes())
            .map_err(|e| CatalogError::Internal(anyhow!("token hash key: {e}")))
    }

    pub fn issue_opaque_token(&self) -> Result<IssuedToken, CatalogError> {
        let mut rng = rand::rng();
        let plaintext: String = (0..OPAQUE_TOKEN_LEN)
            .map(|_| HEX_CHARSET[rng.random_range(0..HEX_CHARSET.len())] as char)
            .collect();
        let stored_hash = self.hash_opaque_token(&plaintext)?;
        Ok(IssuedToken {
            plaintext,
            stored_hash,
        })
    }

    fn hash_opaque_token(&self, plaintext: &str) -> Result<String, CatalogError> {
        let mut mac = self.mac()?;
        mac.update(plaintext.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Constant-time check of `plaintext` against a stored hash. A stored
    /// hash that is not valid hex never matches.
    pub fn verify_opaque_token(&self, plaintext: &str, stored_hash: &str) -> bool {
        let Ok(expected) = hex::decode(stored_hash) else {
            return false;
        };
        let Ok(mut mac) = self.mac() else {
            return false;
        };
        mac.update(plaintext.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    pub fn issue_session_token(&self, user_id: Uuid) -> Result<String, CatalogError> {
        Ok(issue_session_token(user_id, &self.jwt_secret)?)
    }

    /// Fails with `Invalid token` when the token is malformed or its
    /// signature does not match.
    pub fn verify_session_token(&self, token: &str) -> Result<Uuid, CatalogError> {
        Ok(validate_session_token(token, &self.jwt_secret)?)
    }
}
