use std::borrow::Cow;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::repository::{PasswordHasher, TokenRepository, UserRepository};
use crate::domain::types::{
    EVENT_PASSWORD_RESET_COMPLETED, EVENT_PASSWORD_RESET_REQUESTED, OutboxEvent, StoredToken,
    TokenPurpose,
};
use crate::error::CatalogError;
use crate::usecase::token::TokenService;
use crate::usecase::user::{normalize_email, password_present};

// ── ForgotPassword ───────────────────────────────────────────────────────────

fn email_present(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::Borrowed("email is missing!"))
        );
    }
    Ok(())
}

#[derive(Debug, Validate)]
pub struct ForgotPasswordInput {
    #[validate(custom(function = "email_present"), email(message = "Email is invalid!"))]
    pub email: String,
}

pub struct ForgotPasswordUseCase<U: UserRepository, T: TokenRepository> {
    pub users: U,
    pub token_repo: T,
    pub tokens: TokenService,
    pub frontend_url: String,
}

impl<U: UserRepository, T: TokenRepository> ForgotPasswordUseCase<U, T> {
    /// Issue a reset token, replacing any previous one for the same user.
    pub async fn execute(&self, email: &str) -> Result<(), CatalogError> {
        let input = ForgotPasswordInput {
            email: normalize_email(email),
        };
        input
            .validate()
            .map_err(|e| CatalogError::from_validation(&e, &["email"]))?;
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| CatalogError::not_found("User not found!"))?;

        let issued = self.tokens.issue_opaque_token()?;
        let token = StoredToken {
            owner_id: user.id,
            token_hash: issued.stored_hash,
            created_at: Utc::now(),
        };
        let link = format!(
            "{}/auth/reset-password?token={}&id={}",
            self.frontend_url.trim_end_matches('/'),
            issued.plaintext,
            user.id
        );
        let event = OutboxEvent::new(
            EVENT_PASSWORD_RESET_REQUESTED,
            &user.email,
            json!({ "name": user.name, "link": link }),
        );
        self.token_repo
            .replace_with_outbox(TokenPurpose::PasswordReset, &token, &event)
            .await
    }
}

// ── Reset-token guard ────────────────────────────────────────────────────────

/// Checks a submitted reset token before the status or reset step runs and
/// hands the resolved record on, so the next step needs no second lookup.
pub struct ResetTokenGuard<T: TokenRepository> {
    pub token_repo: T,
    pub tokens: TokenService,
}

impl<T: TokenRepository> ResetTokenGuard<T> {
    pub async fn check(&self, token: &str, user_id: &str) -> Result<StoredToken, CatalogError> {
        let token = token.trim();
        let user_id = user_id.trim().parse::<Uuid>().ok().filter(|_| !token.is_empty());
        let Some(user_id) = user_id else {
            return Err(CatalogError::invalid("Invalid request!"));
        };

        let stored = self
            .token_repo
            .find(TokenPurpose::PasswordReset, user_id)
            .await?
            .filter(|t| !t.is_expired(Utc::now()))
            .ok_or_else(|| CatalogError::invalid("unauthorized access, invalid request!"))?;

        if !self.tokens.verify_opaque_token(token, &stored.token_hash) {
            return Err(CatalogError::Unauthenticated(
                "unauthorized access, invalid request!".to_owned(),
            ));
        }
        Ok(stored)
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

#[derive(Debug, Validate)]
pub struct ResetPasswordInput {
    #[validate(
        custom(function = "password_present"),
        length(min = 8, max = 20, message = "Password must be 8 to 20 characters long!")
    )]
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
}

impl<U: UserRepository, H: PasswordHasher> ResetPasswordUseCase<U, H> {
    /// `guarded` must come from [`ResetTokenGuard::check`].
    pub async fn execute(
        &self,
        guarded: &StoredToken,
        new_password: &str,
    ) -> Result<(), CatalogError> {
        ResetPasswordInput {
            new_password: new_password.to_owned(),
        }
        .validate()
        .map_err(|e| CatalogError::from_validation(&e, &["new_password"]))?;
        let user = self
            .users
            .find_by_id(guarded.owner_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("User not found!"))?;

        if self.hasher.verify(new_password, &user.password_hash).await? {
            return Err(CatalogError::invalid(
                "The new password must be different!",
            ));
        }

        let password_hash = self.hasher.hash(new_password).await?;
        let event = OutboxEvent::new(
            EVENT_PASSWORD_RESET_COMPLETED,
            &user.email,
            json!({ "name": user.name }),
        );
        self.users
            .reset_password(user.id, &password_hash, &event)
            .await
    }
}
