use anyhow::{Context as _, anyhow};
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::repository::PasswordHasher;
use crate::error::CatalogError;

/// Argon2id with the crate's default parameters. Hashing runs on the
/// blocking pool so it never stalls the request executor.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, CatalogError> {
        let password = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || {
            let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
                .map_err(|e| anyhow!("encode salt: {e}"))?;
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| anyhow!("hash password: {e}"))
        })
        .await
        .context("join password hashing task")??;
        Ok(hashed)
    }

    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, CatalogError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        let matched = tokio::task::spawn_blocking(move || {
            let parsed =
                PasswordHash::new(&password_hash).map_err(|e| anyhow!("parse password hash: {e}"))?;
            Ok::<_, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
            )
        })
        .await
        .context("join password verification task")??;
        Ok(matched)
    }
}
