//! Then steps for CSV import scenarios.

use super::world::{ImportWorld, run_async};
use rstest_bdd_macros::then;

#[then("{count:usize} sprints are created")]
fn sprints_created(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    let summary = world.summary()?;
    if summary.sprints_created != count {
        return Err(eyre::eyre!(
            "expected {count} sprints created, got {}",
            summary.sprints_created
        ));
    }
    Ok(())
}

#[then("{count:usize} tasks are created")]
fn tasks_created(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    let summary = world.summary()?;
    if summary.tasks_created != count {
        return Err(eyre::eyre!(
            "expected {count} tasks created, got {}",
            summary.tasks_created
        ));
    }
    Ok(())
}

#[then(r#"the sprint "{name}" holds {count:usize} tasks"#)]
fn sprint_holds(world: &ImportWorld, name: String, count: usize) -> Result<(), eyre::Report> {
    let sprints = run_async(world.tracker.list_sprints())?;
    let sprint = sprints
        .iter()
        .find(|sprint| sprint.name == name)
        .ok_or_else(|| eyre::eyre!("no sprint named {name}"))?;
    let tasks = run_async(world.tracker.list_tasks(Some(&sprint.id)))?;
    if tasks.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tasks in {name}, found {}",
            tasks.len()
        ));
    }
    Ok(())
}

#[then("the backlog holds {count:usize} tasks")]
fn backlog_holds(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = run_async(world.tracker.list_tasks(None))?;
    if tasks.len() != count {
        return Err(eyre::eyre!(
            "expected {count} backlog tasks, found {}",
            tasks.len()
        ));
    }
    Ok(())
}

#[then(r#"the import warnings include "{warning}""#)]
fn warnings_include(world: &ImportWorld, warning: String) -> Result<(), eyre::Report> {
    let summary = world.summary()?;
    let messages: Vec<String> = summary.errors.iter().map(ToString::to_string).collect();
    if !messages.contains(&warning) {
        return Err(eyre::eyre!("warning {warning:?} not in {messages:?}"));
    }
    Ok(())
}

#[then(r#"the import is rejected with "{message}""#)]
fn import_rejected(world: &ImportWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("import has not run"))?;
    match result {
        Err(err) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!("expected rejection {message:?}, got {other:?}")),
    }
}

#[then("{count:usize} tasks are stored")]
fn tasks_stored(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = run_async(world.tracker.list_all_tasks())?;
    if tasks.len() != count {
        return Err(eyre::eyre!("expected {count} stored tasks, found {}", tasks.len()));
    }
    Ok(())
}
