//! `Authorization: Bearer <token>` extractor.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;

use crate::token::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Raw session token taken from the `Authorization` header.
///
/// Rejects with [`AuthError::Missing`] when the header is absent, not valid
/// ASCII, lacks the `Bearer ` prefix, or carries an empty token. Signature
/// validation happens later, against the service secret.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Parse a raw header value.
    pub fn parse(value: &str) -> Option<Self> {
        let token = value.strip_prefix(BEARER_PREFIX)?.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self(token.to_owned()))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    // Extract synchronously and return a 'static future so the parts borrow
    // does not leak into the returned future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(BearerToken::parse);

        if token.is_none() && parts.headers.contains_key(AUTHORIZATION) {
            tracing::debug!("authorization header present but not a bearer token");
        }

        async move { token.ok_or(AuthError::Missing) }
    }
}
