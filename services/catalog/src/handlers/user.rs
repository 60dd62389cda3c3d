use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use reelhouse_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::CatalogError;
use crate::handlers::form::json_body;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::usecase::password::{ForgotPasswordUseCase, ResetPasswordUseCase, ResetTokenGuard};
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, ResendVerificationUseCase, SignInInput, SignInUseCase,
    SignedIn, VerifyEmailUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub role: UserRole,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_verified: user.is_verified,
            role: user.role,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub token: String,
}

impl From<SignedIn> for SessionResponse {
    fn from(signed_in: SignedIn) -> Self {
        Self {
            profile: signed_in.user.into(),
            token: signed_in.token,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetTokenRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub new_password: String,
}

// ── POST /api/user/create ────────────────────────────────────────────────────

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
        tokens: state.tokens.clone(),
    };
    let user = usecase
        .execute(CreateUserInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": { "id": user.id, "name": user.name, "email": user.email } })),
    ))
}

// ── POST /api/user/sign-in ───────────────────────────────────────────────────

pub async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let usecase = SignInUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
        tokens: state.tokens.clone(),
    };
    let signed_in = usecase
        .execute(SignInInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(json!({ "user": SessionResponse::from(signed_in) })))
}

// ── POST /api/user/verify-email ──────────────────────────────────────────────

pub async fn verify_email(
    State(state): State<AppState>,
    body: Result<Json<VerifyEmailRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let usecase = VerifyEmailUseCase {
        users: state.user_repo(),
        token_repo: state.token_repo(),
        tokens: state.tokens.clone(),
    };
    let signed_in = usecase.execute(&body.user_id, &body.token).await?;
    Ok(Json(json!({
        "user": SessionResponse::from(signed_in),
        "message": "Your email is verified.",
    })))
}

// ── POST /api/user/resend-email-verification-token ───────────────────────────

pub async fn resend_verification(
    State(state): State<AppState>,
    body: Result<Json<ResendVerificationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let usecase = ResendVerificationUseCase {
        users: state.user_repo(),
        token_repo: state.token_repo(),
        tokens: state.tokens.clone(),
    };
    usecase.execute(&body.user_id).await?;
    Ok(Json(json!({
        "message": "New verification token has been sent to your registered email account."
    })))
}

// ── POST /api/user/forgot-password ───────────────────────────────────────────

pub async fn forgot_password(
    State(state): State<AppState>,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        token_repo: state.token_repo(),
        tokens: state.tokens.clone(),
        frontend_url: state.frontend_url.clone(),
    };
    usecase.execute(&body.email).await?;
    Ok(Json(json!({ "message": "Link sent to your email!" })))
}

// ── POST /api/user/verify-password-reset-token ───────────────────────────────

pub async fn verify_reset_token(
    State(state): State<AppState>,
    body: Result<Json<ResetTokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let guard = ResetTokenGuard {
        token_repo: state.token_repo(),
        tokens: state.tokens.clone(),
    };
    guard.check(&body.token, &body.user_id).await?;
    Ok(Json(json!({ "valid": true })))
}

// ── POST /api/user/reset-password ────────────────────────────────────────────

pub async fn reset_password(
    State(state): State<AppState>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let guard = ResetTokenGuard {
        token_repo: state.token_repo(),
        tokens: state.tokens.clone(),
    };
    let stored = guard.check(&body.token, &body.user_id).await?;

    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
    };
    usecase.execute(&stored, &body.new_password).await?;
    tracing::info!(user_id = %stored.owner_id, "password reset");
    Ok(Json(json!({
        "message": "Password reset successfully, now you can use new password."
    })))
}

// ── GET /api/user/is-auth ────────────────────────────────────────────────────

pub async fn is_auth(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(json!({ "user": ProfileResponse::from(user) }))
}
