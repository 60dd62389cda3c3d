use reelhouse_catalog::domain::types::{
    EVENT_EMAIL_VERIFICATION_REQUESTED, EVENT_WELCOME, TokenPurpose,
};
use reelhouse_catalog::error::CatalogError;
use reelhouse_catalog::usecase::user::{
    CreateUserInput, CreateUserUseCase, ResendVerificationUseCase, SignInInput, SignInUseCase,
    VerifyEmailUseCase,
};

use crate::helpers::{
    InMemoryAccounts, MockTokenRepo, MockUserRepo, PlainHasher, test_user, token_service,
};

fn create_usecase(accounts: &InMemoryAccounts) -> CreateUserUseCase<MockUserRepo, PlainHasher> {
    CreateUserUseCase {
        users: accounts.user_repo(),
        hasher: PlainHasher,
        tokens: token_service(),
    }
}

fn input(email: &str) -> CreateUserInput {
    CreateUserInput {
        name: " Bob ".to_owned(),
        email: email.to_owned(),
        password: "password1".to_owned(),
    }
}

fn verify_usecase(accounts: &InMemoryAccounts) -> VerifyEmailUseCase<MockUserRepo, MockTokenRepo> {
    VerifyEmailUseCase {
        users: accounts.user_repo(),
        token_repo: accounts.token_repo(),
        tokens: token_service(),
    }
}

fn sent_token(accounts: &InMemoryAccounts) -> String {
    let events = accounts.events(EVENT_EMAIL_VERIFICATION_REQUESTED);
    let last = events.last().expect("verification event queued");
    last.payload["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn should_create_unverified_user_and_queue_verification_mail() {
    let accounts = InMemoryAccounts::default();
    let user = create_usecase(&accounts)
        .execute(input(" Bob@Example.com "))
        .await
        .unwrap();

    assert_eq!(user.name, "Bob");
    assert_eq!(user.email, "bob@example.com");
    assert!(!user.is_verified);
    assert_eq!(user.password_hash, "plain:password1");
    assert_eq!(accounts.token_count(TokenPurpose::EmailVerification), 1);

    let events = accounts.events(EVENT_EMAIL_VERIFICATION_REQUESTED);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].recipient, "bob@example.com");
    assert_eq!(events[0].payload["token"].as_str().unwrap().len(), 60);
}

#[tokio::test]
async fn should_reject_taken_email() {
    let accounts = InMemoryAccounts::with_users(vec![test_user()]);
    let err = create_usecase(&accounts)
        .execute(input("A@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(ref m) if m == "This email is already in use!"));
}

#[tokio::test]
async fn should_reject_short_password() {
    let accounts = InMemoryAccounts::default();
    let mut short = input("bob@example.com");
    short.password = "short".to_owned();
    let err = create_usecase(&accounts).execute(short).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Password must be 8 to 20 characters long!"));
    assert!(accounts.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_sign_in_with_matching_password() {
    let accounts = InMemoryAccounts::with_users(vec![test_user()]);
    let tokens = token_service();
    let usecase = SignInUseCase {
        users: accounts.user_repo(),
        hasher: PlainHasher,
        tokens: tokens.clone(),
    };
    let signed = usecase
        .execute(SignInInput {
            email: "a@x.com".to_owned(),
            password: "secret123".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(tokens.verify_session_token(&signed.token).unwrap(), signed.user.id);
}

#[tokio::test]
async fn should_report_mismatch_for_unknown_email_and_wrong_password() {
    let accounts = InMemoryAccounts::with_users(vec![test_user()]);
    let usecase = SignInUseCase {
        users: accounts.user_repo(),
        hasher: PlainHasher,
        tokens: token_service(),
    };
    for (email, password) in [("nobody@x.com", "secret123"), ("a@x.com", "wrong-pass")] {
        let err = usecase
            .execute(SignInInput {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Email/Password mismatch!"));
    }
}

#[tokio::test]
async fn should_verify_email_with_mailed_token() {
    let accounts = InMemoryAccounts::default();
    let user = create_usecase(&accounts)
        .execute(input("bob@example.com"))
        .await
        .unwrap();
    let token = sent_token(&accounts);

    let signed = verify_usecase(&accounts)
        .execute(&user.id.to_string(), &token)
        .await
        .unwrap();

    assert!(signed.user.is_verified);
    assert_eq!(accounts.token_count(TokenPurpose::EmailVerification), 0);
    assert_eq!(accounts.events(EVENT_WELCOME).len(), 1);

    let err = verify_usecase(&accounts)
        .execute(&user.id.to_string(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "user is already verified!"));
}

#[tokio::test]
async fn should_reject_wrong_verification_token() {
    let accounts = InMemoryAccounts::default();
    let user = create_usecase(&accounts)
        .execute(input("bob@example.com"))
        .await
        .unwrap();

    let err = verify_usecase(&accounts)
        .execute(&user.id.to_string(), &"0".repeat(60))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Please submit a valid token!"));
    assert_eq!(accounts.token_count(TokenPurpose::EmailVerification), 1);
}

#[tokio::test]
async fn should_replace_verification_token_on_resend() {
    let accounts = InMemoryAccounts::default();
    let user = create_usecase(&accounts)
        .execute(input("bob@example.com"))
        .await
        .unwrap();
    let first = sent_token(&accounts);

    ResendVerificationUseCase {
        users: accounts.user_repo(),
        token_repo: accounts.token_repo(),
        tokens: token_service(),
    }
    .execute(&user.id.to_string())
    .await
    .unwrap();
    let second = sent_token(&accounts);

    assert_ne!(first, second);
    assert_eq!(accounts.token_count(TokenPurpose::EmailVerification), 1);
    let err = verify_usecase(&accounts)
        .execute(&user.id.to_string(), &first)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
    verify_usecase(&accounts)
        .execute(&user.id.to_string(), &second)
        .await
        .unwrap();
}
