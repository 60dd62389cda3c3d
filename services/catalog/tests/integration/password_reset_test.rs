use reelhouse_catalog::domain::types::{
    EVENT_PASSWORD_RESET_COMPLETED, EVENT_PASSWORD_RESET_REQUESTED, TokenPurpose,
};
use reelhouse_catalog::error::CatalogError;
use reelhouse_catalog::usecase::password::{
    ForgotPasswordUseCase, ResetPasswordUseCase, ResetTokenGuard,
};

use crate::helpers::{
    InMemoryAccounts, MockTokenRepo, MockUserRepo, PlainHasher, test_user, token_service,
};

fn forgot(accounts: &InMemoryAccounts) -> ForgotPasswordUseCase<MockUserRepo, MockTokenRepo> {
    ForgotPasswordUseCase {
        users: accounts.user_repo(),
        token_repo: accounts.token_repo(),
        tokens: token_service(),
        frontend_url: "http://localhost:3000/".to_owned(),
    }
}

fn guard(accounts: &InMemoryAccounts) -> ResetTokenGuard<MockTokenRepo> {
    ResetTokenGuard {
        token_repo: accounts.token_repo(),
        tokens: token_service(),
    }
}

/// Pull `token` out of the last mailed reset link.
fn mailed_token(accounts: &InMemoryAccounts) -> String {
    let events = accounts.events(EVENT_PASSWORD_RESET_REQUESTED);
    let link = events.last().unwrap().payload["link"].as_str().unwrap().to_owned();
    let query = link.split_once('?').unwrap().1;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .unwrap()
        .to_owned()
}

#[tokio::test]
async fn should_mail_reset_link_to_frontend() {
    let user = test_user();
    let accounts = InMemoryAccounts::with_users(vec![user.clone()]);
    forgot(&accounts).execute("a@x.com").await.unwrap();

    let events = accounts.events(EVENT_PASSWORD_RESET_REQUESTED);
    assert_eq!(events.len(), 1);
    let link = events[0].payload["link"].as_str().unwrap();
    assert!(link.starts_with("http://localhost:3000/auth/reset-password?token="));
    assert!(link.ends_with(&format!("&id={}", user.id)));
    assert_eq!(accounts.token_count(TokenPurpose::PasswordReset), 1);
}

#[tokio::test]
async fn should_report_unknown_email() {
    let accounts = InMemoryAccounts::default();
    let err = forgot(&accounts).execute("ghost@x.com").await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(ref m) if m == "User not found!"));

    let err = forgot(&accounts).execute("  ").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "email is missing!"));
}

#[tokio::test]
async fn should_invalidate_previous_reset_token_on_second_request() {
    let user = test_user();
    let accounts = InMemoryAccounts::with_users(vec![user.clone()]);
    forgot(&accounts).execute("a@x.com").await.unwrap();
    let first = mailed_token(&accounts);
    forgot(&accounts).execute("a@x.com").await.unwrap();
    let second = mailed_token(&accounts);

    assert_eq!(accounts.token_count(TokenPurpose::PasswordReset), 1);
    let err = guard(&accounts)
        .check(&first, &user.id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Unauthenticated(_)));
    guard(&accounts)
        .check(&second, &user.id.to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn should_reject_guard_without_token_or_user() {
    let accounts = InMemoryAccounts::default();
    for (token, id) in [("", "00000000-0000-0000-0000-000000000001"), ("abc", "not-a-uuid")] {
        let err = guard(&accounts).check(token, id).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Invalid request!"));
    }

    let err = guard(&accounts)
        .check("abc", "00000000-0000-0000-0000-000000000001")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "unauthorized access, invalid request!"));
}

#[tokio::test]
async fn should_reject_reusing_current_password() {
    let user = test_user();
    let accounts = InMemoryAccounts::with_users(vec![user.clone()]);
    forgot(&accounts).execute("a@x.com").await.unwrap();
    let stored = guard(&accounts)
        .check(&mailed_token(&accounts), &user.id.to_string())
        .await
        .unwrap();

    let err = ResetPasswordUseCase {
        users: accounts.user_repo(),
        hasher: PlainHasher,
    }
    .execute(&stored, "secret123")
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "The new password must be different!"));
    assert_eq!(accounts.token_count(TokenPurpose::PasswordReset), 1);
}

#[tokio::test]
async fn should_reset_password_and_consume_token() {
    let user = test_user();
    let accounts = InMemoryAccounts::with_users(vec![user.clone()]);
    forgot(&accounts).execute("a@x.com").await.unwrap();
    let token = mailed_token(&accounts);
    let stored = guard(&accounts)
        .check(&token, &user.id.to_string())
        .await
        .unwrap();

    ResetPasswordUseCase {
        users: accounts.user_repo(),
        hasher: PlainHasher,
    }
    .execute(&stored, "brand-new-pass")
    .await
    .unwrap();

    let saved = accounts.users.lock().unwrap()[0].clone();
    assert_eq!(saved.password_hash, "plain:brand-new-pass");
    assert_eq!(accounts.token_count(TokenPurpose::PasswordReset), 0);
    assert_eq!(accounts.events(EVENT_PASSWORD_RESET_COMPLETED).len(), 1);

    let err = guard(&accounts)
        .check(&token, &user.id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
}

#[tokio::test]
async fn should_validate_reset_inputs_before_touching_store() {
    let user = test_user();
    let accounts = InMemoryAccounts::with_users(vec![user.clone()]);
    let err = forgot(&accounts).execute("a@@x.com").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Email is invalid!"));
    assert_eq!(accounts.token_count(TokenPurpose::PasswordReset), 0);

    forgot(&accounts).execute(" A@X.com ").await.unwrap();
    let stored = guard(&accounts)
        .check(&mailed_token(&accounts), &user.id.to_string())
        .await
        .unwrap();
    let reset = ResetPasswordUseCase {
        users: accounts.user_repo(),
        hasher: PlainHasher,
    };
    let err = reset
        .execute(&stored, "an-overly-long-password-1")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Password must be 8 to 20 characters long!"));
    let err = reset.execute(&stored, "   ").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Password is missing!"));
    assert!(accounts.events(EVENT_PASSWORD_RESET_COMPLETED).is_empty());
}
