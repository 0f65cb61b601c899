//! Auth service tests: display-name fallback, password policy, inert mode.

use std::sync::{Arc, Mutex};

use crate::backend::{
    Backend, BackendServices,
    domain::AuthUser,
    ports::AuthError,
};
use crate::tracker::{
    domain::UserId,
    services::{
        AuthService, GENERIC_ERROR_MESSAGE, SessionError, display_name_or_email, user_message,
    },
};
use rstest::{fixture, rstest};

#[fixture]
fn service() -> AuthService {
    AuthService::new(&Backend::connected(BackendServices::in_memory()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_up_defaults_display_name_to_email(service: AuthService) {
    let user = service
        .sign_up(" grace@example.test ", "hopper1", "   ")
        .await
        .expect("sign up");
    assert_eq!(user.display_name(), Some("grace@example.test"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn short_password_is_rejected_before_the_provider(service: AuthService) {
    let result = service.change_password("12345").await;
    assert!(matches!(
        result,
        Err(SessionError::Auth(AuthError::WeakPassword { min_length: 6 }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_password_requires_a_session(service: AuthService) {
    let result = service.change_password("long-enough").await;
    assert!(matches!(result, Err(SessionError::Auth(AuthError::NotSignedIn))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_display_name_updates_profile_and_user_doc(service: AuthService) {
    let user = service
        .sign_up("ada@example.test", "lovelace", "Ada")
        .await
        .expect("sign up");
    let uid = UserId::new(user.uid());
    service
        .tracker()
        .ensure_user_doc(&uid, "ada@example.test", "Ada")
        .await
        .expect("profile");

    let renamed = service
        .change_display_name("  ")
        .await
        .expect("rename");
    assert_eq!(renamed.display_name(), Some("ada@example.test"));

    let names: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&names);
    let _subscription = service
        .tracker()
        .subscribe_users(move |users| {
            *sink.lock().expect("lock") = users.into_iter().map(|u| u.display_name).collect();
        })
        .expect("subscribe");
    assert_eq!(*names.lock().expect("lock"), vec!["ada@example.test".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn auth_subscription_follows_sign_in_and_out(service: AuthService) {
    let states: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&states);
    let _subscription = service
        .subscribe_auth(move |user: Option<AuthUser>| {
            sink.lock()
                .expect("lock")
                .push(user.map(|signed_in| signed_in.uid().to_owned()));
        })
        .expect("subscribe");

    service
        .sign_up("bob@example.test", "builder", "Bob")
        .await
        .expect("sign up");
    service.sign_out().await.expect("sign out");

    let seen = states.lock().expect("lock").clone();
    assert_eq!(seen.first(), Some(&None));
    assert!(seen.iter().any(Option::is_some));
    assert_eq!(seen.last(), Some(&None));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inert_auth_reports_not_configured() {
    let service = AuthService::new(&Backend::unconfigured());
    let result = service.sign_in("a@example.test", "secret1").await;
    assert!(matches!(result, Err(SessionError::Auth(AuthError::NotConfigured))));
    service.sign_out().await.expect("inert sign out is a no-op");
    assert_eq!(service.current_user().await.expect("current"), None);
}

#[rstest]
#[case("Ada", "ada@x.test", "Ada")]
#[case("  Ada  ", "ada@x.test", "Ada")]
#[case("", "ada@x.test", "ada@x.test")]
fn display_name_falls_back_to_email(
    #[case] display_name: &str,
    #[case] email: &str,
    #[case] expected: &str,
) {
    assert_eq!(display_name_or_email(display_name, email), expected);
}

#[derive(Debug, thiserror::Error)]
#[error("")]
struct Silent;

#[rstest]
fn user_message_uses_fallback_for_blank_errors() {
    assert_eq!(user_message(&Silent), GENERIC_ERROR_MESSAGE);
    assert_eq!(
        user_message(&AuthError::InvalidCredentials),
        "invalid email or password"
    );
}
