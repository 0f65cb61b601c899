//! Sign-up, profile documents and auth-state tracking.

use std::time::Duration;

use super::helpers::{Workspace, inert_workspace, workspace};
use rstest::rstest;
use sprintboard::{
    backend::ports::AuthError,
    tracker::services::SessionError,
    views::{AuthView, LoginForm, LoginMode, SubmitOutcome, UsersView},
};

const WAIT: Duration = Duration::from_secs(2);

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signing_up_creates_a_user_document(workspace: Workspace) -> Result<(), eyre::Report> {
    let auth_view = AuthView::open(&workspace.auth)?;
    let users = UsersView::open(&workspace.tracker)?;
    let mut form = LoginForm::new();
    form.toggle_mode();
    form.email = " ada@example.test ".to_owned();
    form.password = "secret1".to_owned();
    form.display_name = "Ada".to_owned();

    let outcome = form.submit(&workspace.auth).await;

    let SubmitOutcome::SignedIn(user) = outcome else {
        return Err(eyre::eyre!("sign-up failed: {outcome:?}"));
    };
    eyre::ensure!(form.mode == LoginMode::SignUp, "mode should be kept");
    eyre::ensure!(user.email() == Some("ada@example.test"), "email trimmed");

    let mut changes = users.collection().changes();
    tokio::time::timeout(WAIT, changes.wait_for(|snapshot| !snapshot.is_empty())).await??;
    let profile = users
        .users()
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("user document missing"))?;
    eyre::ensure!(profile.display_name == "Ada", "display name stored");
    eyre::ensure!(
        auth_view.user().map(|current| current.uid().to_owned()) == Some(user.uid().to_owned()),
        "auth view should track the session"
    );
    eyre::ensure!(!auth_view.is_loading(), "auth view should have settled");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inert_backend_reports_signed_out(inert_workspace: Workspace) -> Result<(), eyre::Report> {
    let auth_view = AuthView::open(&inert_workspace.auth)?;

    let result = inert_workspace.auth.sign_in("a@example.test", "secret1").await;

    eyre::ensure!(auth_view.user().is_none(), "nobody is signed in");
    eyre::ensure!(!auth_view.is_loading(), "inert auth settles immediately");
    eyre::ensure!(
        matches!(result, Err(SessionError::Auth(AuthError::NotConfigured))),
        "expected NotConfigured, got {result:?}"
    );
    Ok(())
}
