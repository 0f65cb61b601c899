//! Login, profile and import forms.

use std::sync::Arc;

use crate::backend::{Backend, BackendServices};
use crate::import::ImportError;
use crate::tracker::{
    domain::UserId,
    services::{AuthService, TrackerService},
};
use crate::views::{
    ImportOutcome, ImportPanel, InFlight, LoginForm, LoginMode, NAME_UPDATED, PASSWORD_TOO_SHORT,
    PASSWORD_UPDATED, ProfileForm, SubmitOutcome,
};
use rstest::{fixture, rstest};

#[fixture]
fn backend() -> Backend {
    Backend::connected(BackendServices::in_memory())
}

#[rstest]
fn in_flight_refuses_a_second_begin() {
    let flag = InFlight::new();
    let guard = flag.try_begin().expect("first begin");
    assert!(flag.is_busy());
    assert!(flag.clone().try_begin().is_none());
    drop(guard);
    assert!(!flag.is_busy());
    assert!(flag.try_begin().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_up_then_sign_in(backend: Backend) {
    let auth = AuthService::new(&backend);
    let mut form = LoginForm::new();
    form.toggle_mode();
    assert_eq!(form.mode, LoginMode::SignUp);
    form.email = "ana@example.test".to_owned();
    form.password = "secret1".to_owned();

    let outcome = form.submit(&auth).await;
    let SubmitOutcome::SignedIn(user) = outcome else {
        panic!("expected sign-up to succeed, got {outcome:?}");
    };
    assert_eq!(user.display_name(), Some("ana@example.test"));

    auth.sign_out().await.expect("sign out");
    form.toggle_mode();
    assert!(matches!(form.submit(&auth).await, SubmitOutcome::SignedIn(_)));
    assert_eq!(form.error(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_surfaces_provider_message(backend: Backend) {
    let auth = AuthService::new(&backend);
    let mut form = LoginForm::new();
    form.email = "nobody@example.test".to_owned();
    form.password = "whatever".to_owned();

    let outcome = form.submit(&auth).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("invalid email or password".to_owned())
    );
    assert_eq!(form.error(), Some("invalid email or password"));
    assert!(!form.in_flight().is_busy());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn busy_form_does_not_resubmit(backend: Backend) {
    let auth = AuthService::new(&backend);
    let mut form = LoginForm::new();
    let _held = form.in_flight().try_begin().expect("hold the flag");
    assert_eq!(form.submit(&auth).await, SubmitOutcome::Busy);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_form_validates_and_updates(backend: Backend) {
    let auth = AuthService::new(&backend);
    let user = auth
        .sign_up("eve@example.test", "secret1", "Eve")
        .await
        .expect("sign up");
    auth.tracker()
        .ensure_user_doc(&UserId::new(user.uid()), "eve@example.test", "Eve")
        .await
        .expect("profile");
    let mut form = ProfileForm::new("Eve");

    form.new_password = "12345".to_owned();
    assert!(!form.change_password(&auth).await);
    assert_eq!(form.error(), Some(PASSWORD_TOO_SHORT));

    form.new_password = "123456".to_owned();
    assert!(form.change_password(&auth).await);
    assert_eq!(form.success(), Some(PASSWORD_UPDATED));
    assert!(form.new_password.is_empty());

    form.display_name = "  ".to_owned();
    assert!(form.update_name(&auth).await);
    assert_eq!(form.success(), Some(NAME_UPDATED));
    assert_eq!(form.display_name, "eve@example.test");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_panel_previews_and_runs(backend: Backend) {
    let tracker = TrackerService::new(&backend);
    let mut panel = ImportPanel::new();
    assert_eq!(panel.preview(), None);
    assert_eq!(panel.run(&tracker, &[]).await, ImportOutcome::Skipped);

    panel.use_sample();
    let preview = panel.preview().expect("preview");
    assert_eq!(preview.rows.len(), 3);
    assert_eq!(preview.sprint_names.len(), 2);

    let ImportOutcome::Completed(summary) = panel.run(&tracker, &[]).await else {
        panic!("sample import should complete");
    };
    assert_eq!(summary.sprints_created, 2);
    assert_eq!(summary.tasks_created, 3);
    assert!(summary.imported_anything());
    assert_eq!(panel.result(), Some(&summary));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_panel_reports_header_only_text(backend: Backend) {
    let tracker = Arc::new(TrackerService::new(&backend));
    let mut panel = ImportPanel::new();
    panel.set_text("Sprint,Module,Task,Role,Priority,Notes");

    let outcome = panel.run(tracker.as_ref(), &[]).await;
    assert_eq!(outcome, ImportOutcome::Rejected(ImportError::NoRows));
    assert_eq!(panel.error(), Some("No data rows to import."));
}
