use std::borrow::Cow;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use reelhouse_domain::user::UserRole;

use crate::domain::repository::{PasswordHasher, TokenRepository, UserRepository};
use crate::domain::types::{
    EVENT_EMAIL_VERIFICATION_REQUESTED, EVENT_WELCOME, OutboxEvent, StoredToken, TokenPurpose,
    User,
};
use crate::error::CatalogError;
use crate::usecase::token::TokenService;

// ── Validation ───────────────────────────────────────────────────────────────

pub(crate) fn password_present(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::Borrowed("Password is missing!"))
        );
    }
    Ok(())
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn parse_user_id(raw: &str) -> Result<Uuid, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::invalid("Invalid user!"))
}

fn verification_event(user: &User, plaintext: &str) -> OutboxEvent {
    OutboxEvent::new(
        EVENT_EMAIL_VERIFICATION_REQUESTED,
        &user.email,
        json!({ "userId": user.id, "name": user.name, "token": plaintext }),
    )
}

// ── CreateUser ───────────────────────────────────────────────────────────────

#[derive(Debug, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, message = "Name is missing!"))]
    pub name: String,
    #[validate(email(message = "Email is invalid!"))]
    pub email: String,
    #[validate(
        custom(function = "password_present"),
        length(min = 8, max = 20, message = "Password must be 8 to 20 characters long!")
    )]
    pub password: String,
}

impl CreateUserInput {
    /// Trims the name, lowercases the email, then validates in form order.
    pub fn normalize(self) -> Result<Self, CatalogError> {
        let input = Self {
            name: self.name.trim().to_owned(),
            email: normalize_email(&self.email),
            password: self.password,
        };
        input
            .validate()
            .map_err(|e| CatalogError::from_validation(&e, &["name", "email", "password"]))?;
        Ok(input)
    }
}

pub struct CreateUserUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub tokens: TokenService,
}

impl<U: UserRepository, H: PasswordHasher> CreateUserUseCase<U, H> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, CatalogError> {
        let CreateUserInput {
            name,
            email,
            password,
        } = input.normalize()?;

        // Early check for a friendlier path; the unique index decides races.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(CatalogError::Conflict(
                "This email is already in use!".to_owned(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash: self.hasher.hash(&password).await?,
            role: UserRole::User,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };

        let issued = self.tokens.issue_opaque_token()?;
        let token = StoredToken {
            owner_id: user.id,
            token_hash: issued.stored_hash,
            created_at: now,
        };
        let event = verification_event(&user, &issued.plaintext);
        self.users
            .create_with_verification(&user, &token, &event)
            .await?;
        Ok(user)
    }
}

// ── SignIn ───────────────────────────────────────────────────────────────────

#[derive(Debug, Validate)]
pub struct SignInInput {
    #[validate(email(message = "Email is invalid!"))]
    pub email: String,
    #[validate(custom(function = "password_present"))]
    pub password: String,
}

impl SignInInput {
    pub fn normalize(self) -> Result<Self, CatalogError> {
        let input = Self {
            email: normalize_email(&self.email),
            password: self.password,
        };
        input
            .validate()
            .map_err(|e| CatalogError::from_validation(&e, &["email", "password"]))?;
        Ok(input)
    }
}

pub struct SignedIn {
    pub user: User,
    pub token: String,
}

pub struct SignInUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub tokens: TokenService,
}

impl<U: UserRepository, H: PasswordHasher> SignInUseCase<U, H> {
    pub async fn execute(&self, input: SignInInput) -> Result<SignedIn, CatalogError> {
        let mismatch = || CatalogError::invalid("Email/Password mismatch!");
        let input = input.normalize()?;

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(mismatch)?;
        if !self
            .hasher
            .verify(&input.password, &user.password_hash)
            .await?
        {
            return Err(mismatch());
        }

        let token = self.tokens.issue_session_token(user.id)?;
        Ok(SignedIn { user, token })
    }
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

pub struct VerifyEmailUseCase<U: UserRepository, T: TokenRepository> {
    pub users: U,
    pub token_repo: T,
    pub tokens: TokenService,
}

impl<U: UserRepository, T: TokenRepository> VerifyEmailUseCase<U, T> {
    pub async fn execute(&self, user_id: &str, token: &str) -> Result<SignedIn, CatalogError> {
        let user_id = parse_user_id(user_id)?;
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("user not found!"))?;
        if user.is_verified {
            return Err(CatalogError::invalid("user is already verified!"));
        }

        let stored = self
            .token_repo
            .find(TokenPurpose::EmailVerification, user.id)
            .await?
            .filter(|t| !t.is_expired(Utc::now()))
            .ok_or_else(|| CatalogError::invalid("token not found!"))?;
        if !self.tokens.verify_opaque_token(token.trim(), &stored.token_hash) {
            return Err(CatalogError::invalid("Please submit a valid token!"));
        }

        let event = OutboxEvent::new(EVENT_WELCOME, &user.email, json!({ "name": user.name }));
        self.users.mark_verified(user.id, &event).await?;
        user.is_verified = true;

        let token = self.tokens.issue_session_token(user.id)?;
        Ok(SignedIn { user, token })
    }
}

// ── ResendEmailVerificationToken ─────────────────────────────────────────────

pub struct ResendVerificationUseCase<U: UserRepository, T: TokenRepository> {
    pub users: U,
    pub token_repo: T,
    pub tokens: TokenService,
}

impl<U: UserRepository, T: TokenRepository> ResendVerificationUseCase<U, T> {
    pub async fn execute(&self, user_id: &str) -> Result<(), CatalogError> {
        let user_id = parse_user_id(user_id)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("user not found!"))?;
        if user.is_verified {
            return Err(CatalogError::invalid(
                "This email id is already verified!",
            ));
        }

        let issued = self.tokens.issue_opaque_token()?;
        let token = StoredToken {
            owner_id: user.id,
            token_hash: issued.stored_hash,
            created_at: Utc::now(),
        };
        let event = verification_event(&user, &issued.plaintext);
        self.token_repo
            .replace_with_outbox(TokenPurpose::EmailVerification, &token, &event)
            .await
    }
}
