//! Sprint and task lifecycle through the live views.

use super::helpers::{Workspace, inert_workspace, workspace};
use rstest::rstest;
use sprintboard::{
    tracker::{
        domain::{CreateSprintOptions, EpochMillis, SprintUpdate, TaskStatus},
        services::TrackerError,
    },
    views::{SprintsView, TasksView},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_sprint_moves_its_tasks_into_the_backlog_view(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let sprints = SprintsView::open(&workspace.tracker)?;
    let sprint_id = sprints
        .add_sprint("Sprint 1", CreateSprintOptions::default())
        .await?
        .ok_or_else(|| eyre::eyre!("sprint id missing"))?;
    let planned = TasksView::open(&workspace.tracker, Some(sprint_id.clone()))?;
    let backlog = TasksView::open(&workspace.tracker, None)?;

    planned.add_task("First", None, None).await?;
    planned.add_task("Second", None, None).await?;
    eyre::ensure!(planned.tasks().len() == 2, "planned view should hold both tasks");

    let moved = sprints.remove_sprint(&sprint_id).await?;

    eyre::ensure!(moved == 2, "expected two moved tasks, got {moved}");
    eyre::ensure!(planned.tasks().is_empty(), "planned view should be empty");
    eyre::ensure!(backlog.tasks().len() == 2, "backlog should hold both tasks");
    eyre::ensure!(sprints.sprints().is_empty(), "sprint should be gone");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_to_a_deleted_sprint_is_refused(workspace: Workspace) -> Result<(), eyre::Report> {
    let sprint_id = workspace
        .tracker
        .create_sprint("Short lived", CreateSprintOptions::default())
        .await?
        .ok_or_else(|| eyre::eyre!("sprint id missing"))?;
    let view = TasksView::open(&workspace.tracker, Some(sprint_id.clone()))?;
    workspace.tracker.delete_sprint(&sprint_id).await?;

    let result = view.add_task("Orphan", None, None).await;

    eyre::ensure!(
        matches!(result, Err(TrackerError::UnknownSprint(ref id)) if *id == sprint_id),
        "expected UnknownSprint, got {result:?}"
    );
    eyre::ensure!(
        workspace.tracker.list_all_tasks().await?.is_empty(),
        "no task should be stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renaming_a_sprint_keeps_its_tasks(workspace: Workspace) -> Result<(), eyre::Report> {
    let sprints = SprintsView::open(&workspace.tracker)?;
    let sprint_id = sprints
        .add_sprint(
            "Draft",
            CreateSprintOptions {
                start_date: Some(EpochMillis::new(1_700_000_000_000)),
                end_date: None,
            },
        )
        .await?
        .ok_or_else(|| eyre::eyre!("sprint id missing"))?;
    let planned = TasksView::open(&workspace.tracker, Some(sprint_id.clone()))?;
    planned.add_task("Carry over", None, None).await?;

    sprints
        .update_sprint(
            &sprint_id,
            &SprintUpdate::new()
                .with_name("Sprint 7")
                .with_end_date(Some(EpochMillis::new(1_701_000_000_000))),
        )
        .await?;

    let sprint = sprints
        .sprints()
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("sprint missing"))?;
    eyre::ensure!(sprint.name == "Sprint 7", "name not updated");
    eyre::ensure!(
        sprint.start_date == Some(EpochMillis::new(1_700_000_000_000)),
        "start date should be untouched"
    );
    eyre::ensure!(sprint.end_date.is_some(), "end date not set");
    eyre::ensure!(planned.tasks().len() == 1, "task should stay in the sprint");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_and_done_flag_stay_consistent(workspace: Workspace) -> Result<(), eyre::Report> {
    let view = TasksView::open(&workspace.tracker, None)?;
    let task_id = view
        .add_task("Ship it", None, None)
        .await?
        .ok_or_else(|| eyre::eyre!("task id missing"))?;

    view.update_task_status(&task_id, TaskStatus::Done).await?;
    let done = workspace
        .tracker
        .get_task(&task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(done.done(), "done status should set the flag");

    view.toggle_task(&task_id, false).await?;
    let reopened = workspace
        .tracker
        .get_task(&task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(
        reopened.status() == TaskStatus::Backlog && !reopened.done(),
        "reopening should return the task to backlog"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inert_backend_yields_empty_views(inert_workspace: Workspace) -> Result<(), eyre::Report> {
    eyre::ensure!(!inert_workspace.backend.is_ready(), "backend should be inert");
    let sprints = SprintsView::open(&inert_workspace.tracker)?;
    let tasks = TasksView::open(&inert_workspace.tracker, None)?;

    let created = sprints
        .add_sprint("Ignored", CreateSprintOptions::default())
        .await?;

    eyre::ensure!(created.is_none(), "inert create should return no id");
    eyre::ensure!(sprints.sprints().is_empty(), "no sprints when inert");
    eyre::ensure!(tasks.tasks().is_empty(), "no tasks when inert");
    Ok(())
}
