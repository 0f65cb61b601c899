//! Importing text, then working the kanban board it produces.

use super::helpers::{Workspace, workspace};
use rstest::rstest;
use sprintboard::{
    board::{Board, render_board, render_import_summary},
    tracker::domain::{CreateSprintOptions, TaskStatus},
    views::{ImportOutcome, ImportPanel, SprintsView, TasksView},
};

const CSV: &str = "\
Sprint,Module,Task,Role,Priority,Notes
Sprint 1,Auth,Login page,Dev,High,
Sprint 1,Auth,\"Password reset, email\",Dev,Medium,needs SMTP
Sprint 2,Board,Drag and drop,Design,Low,";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn imported_tasks_land_in_the_backlog_column(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let sprints = SprintsView::open(&workspace.tracker)?;
    sprints
        .add_sprint("Sprint 1", CreateSprintOptions::default())
        .await?;
    let mut panel = ImportPanel::new();
    panel.set_text(CSV);

    let outcome = panel.run(&workspace.tracker, &sprints.sprints()).await;

    let ImportOutcome::Completed(summary) = outcome else {
        return Err(eyre::eyre!("import did not complete: {outcome:?}"));
    };
    eyre::ensure!(summary.sprints_created == 1, "only Sprint 2 is new");
    eyre::ensure!(summary.tasks_created == 3, "all rows import");
    eyre::ensure!(sprints.sprints().len() == 2, "two sprints after import");

    let sprint_one = sprints
        .sprints()
        .into_iter()
        .find(|sprint| sprint.name == "Sprint 1")
        .ok_or_else(|| eyre::eyre!("Sprint 1 missing"))?;
    let view = TasksView::open(&workspace.tracker, Some(sprint_one.id))?;
    let board = view.board();
    eyre::ensure!(board.task_count() == 2, "Sprint 1 holds two tasks");
    eyre::ensure!(
        board.column(TaskStatus::Backlog).map(|column| column.len()) == Some(2),
        "imported tasks start in backlog"
    );
    let titles: Vec<String> = view
        .tasks()
        .iter()
        .map(|task| task.title().to_owned())
        .collect();
    eyre::ensure!(
        titles.contains(&"Password reset, email".to_owned()),
        "quoted title should keep its comma: {titles:?}"
    );

    let rendered = render_import_summary(&summary)?;
    eyre::ensure!(rendered.contains("3"), "summary should count tasks: {rendered}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_a_card_moves_it_between_columns(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let view = TasksView::open(&workspace.tracker, None)?;
    let task_id = view
        .add_task("Wire up board", None, None)
        .await?
        .ok_or_else(|| eyre::eyre!("task id missing"))?;

    let moved = Board::drop_card(
        &workspace.tracker,
        &task_id,
        TaskStatus::Backlog,
        TaskStatus::InProgress,
    )
    .await?;
    eyre::ensure!(moved, "cross-column drop should write");
    let board = view.board();
    eyre::ensure!(
        board.column(TaskStatus::InProgress).map(|column| column.len()) == Some(1),
        "card should sit in progress"
    );

    let same_column = Board::drop_card(
        &workspace.tracker,
        &task_id,
        TaskStatus::InProgress,
        TaskStatus::InProgress,
    )
    .await?;
    eyre::ensure!(!same_column, "same-column drop should not write");

    let rendered = render_board("Backlog", &view.board(), &[])?;
    eyre::ensure!(
        rendered.contains("Wire up board"),
        "rendered board should list the card: {rendered}"
    );
    Ok(())
}
