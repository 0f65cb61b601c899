//! Sprint, task and user views over the in-memory backend.

use crate::backend::{Backend, BackendServices};
use crate::tracker::{
    domain::{CreateSprintOptions, EpochMillis, TaskStatus, UserId},
    services::TrackerService,
};
use crate::views::{SprintsView, TasksView, UsersView};
use rstest::{fixture, rstest};

#[fixture]
fn tracker() -> TrackerService {
    TrackerService::new(&Backend::connected(BackendServices::in_memory()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_view_follows_creation_and_removal(tracker: TrackerService) {
    let view = SprintsView::open(&tracker).expect("open");
    assert!(view.sprints().is_empty());
    assert!(view.collection().is_live());

    let id = view
        .add_sprint("Sprint 1", CreateSprintOptions::default())
        .await
        .expect("add")
        .expect("id");
    assert_eq!(view.sprints().len(), 1);

    view.remove_sprint(&id).await.expect("remove");
    assert!(view.sprints().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_view_is_scoped_to_its_sprint(tracker: TrackerService) {
    let sprint_id = tracker
        .create_sprint("Sprint 1", CreateSprintOptions::default())
        .await
        .expect("sprint")
        .expect("id");
    let planned = TasksView::open(&tracker, Some(sprint_id.clone())).expect("open planned");
    let backlog = TasksView::open(&tracker, None).expect("open backlog");

    let id = planned
        .add_task("Scoped", Some(EpochMillis::new(1)), None)
        .await
        .expect("add")
        .expect("id");
    backlog.add_task("Loose", None, None).await.expect("add backlog");

    let tasks = planned.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks.first().map(|task| task.sprint_id()), Some(Some(&sprint_id)));
    assert_eq!(backlog.tasks().len(), 1);

    planned
        .update_task_status(&id, TaskStatus::InReview)
        .await
        .expect("status");
    let board = planned.board();
    assert_eq!(board.column(TaskStatus::InReview).map(|c| c.len()), Some(1));

    planned.toggle_task(&id, true).await.expect("toggle");
    assert!(planned.tasks().iter().all(|task| task.done()));

    planned
        .update_task_assignment(&id, Some(&UserId::new("u1")))
        .await
        .expect("assign");
    planned.remove_task(&id).await.expect("remove");
    assert!(planned.tasks().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_out_of_the_sprint_updates_both_views(tracker: TrackerService) {
    let sprint_id = tracker
        .create_sprint("Sprint 1", CreateSprintOptions::default())
        .await
        .expect("sprint")
        .expect("id");
    let planned = TasksView::open(&tracker, Some(sprint_id.clone())).expect("planned");
    let backlog = TasksView::open(&tracker, None).expect("backlog");
    let id = planned
        .add_task("Mover", None, None)
        .await
        .expect("add")
        .expect("id");

    tracker.set_task_sprint(&id, None).await.expect("move");

    assert!(planned.tasks().is_empty());
    assert_eq!(backlog.tasks().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn changes_receiver_closes_after_view_drop(tracker: TrackerService) {
    let view = UsersView::open(&tracker).expect("open");
    let mut changes = view.collection().changes();
    tracker
        .ensure_user_doc(&UserId::new("u1"), "ada@example.test", "Ada")
        .await
        .expect("ensure");
    changes
        .wait_for(|users| users.len() == 1)
        .await
        .expect("snapshot with one user");
    assert_eq!(
        view.find(&UserId::new("u1")).map(|user| user.display_name),
        Some("Ada".to_owned())
    );

    drop(view);
    assert!(changes.changed().await.is_err());
}

#[rstest]
fn inert_views_are_empty() {
    let tracker = TrackerService::new(&Backend::unconfigured());
    let sprints = SprintsView::open(&tracker).expect("sprints");
    let tasks = TasksView::open(&tracker, None).expect("tasks");
    let users = UsersView::open(&tracker).expect("users");

    assert!(sprints.sprints().is_empty());
    assert!(tasks.tasks().is_empty());
    assert!(users.users().is_empty());
    assert!(!sprints.collection().is_live());
}
