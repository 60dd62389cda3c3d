//! Mock auth helpers for integration tests.
//!
//! Signs a real session token with the test secret so requests pass through
//! the same access-control middleware as production traffic.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use uuid::Uuid;

use reelhouse_auth_types::token::issue_session_token;

/// Secret shared between test app state and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    secret: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self::with_secret(user_id, TEST_JWT_SECRET)
    }

    pub fn with_secret(user_id: Uuid, secret: &str) -> Self {
        Self {
            user_id,
            secret: secret.to_owned(),
        }
    }

    /// Session token for `user_id`, signed with the configured secret.
    pub fn token(&self) -> String {
        issue_session_token(self.user_id, &self.secret).unwrap()
    }

    /// `Authorization: Bearer <token>` value.
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap()
    }

    /// Return headers as a signed-in client would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.header_value());
        map
    }
}
