use reelhouse_auth_types::bearer::BearerToken;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::CatalogError;
use crate::usecase::token::TokenService;

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<U: UserRepository> {
    pub users: U,
    pub tokens: TokenService,
}

impl<U: UserRepository> AuthenticateUseCase<U> {
    /// Resolve a bearer token to a user. The store is only queried once the
    /// token signature has checked out.
    pub async fn execute(&self, bearer: &BearerToken) -> Result<User, CatalogError> {
        let user_id = self.tokens.verify_session_token(&bearer.0)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CatalogError::Unauthenticated("unauthorized access".to_owned()))
    }
}

// ── Authorize ────────────────────────────────────────────────────────────────

pub fn require_admin(user: &User) -> Result<(), CatalogError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(CatalogError::Forbidden("unauthorized access".to_owned()))
    }
}
