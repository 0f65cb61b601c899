//! Applying a parsed import to the tracker.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use super::parser::{ImportRow, ParseWarning, parse_import_csv};
use crate::tracker::{
    domain::{CreateSprintOptions, CreateTaskOptions, Sprint, SprintId, TaskId},
    services::{TrackerResult, TrackerService},
};

/// Destination for imported sprints and tasks.
///
/// `Ok(None)` means the destination accepted the call but produced no
/// record, as an inert backend does.
#[async_trait]
pub trait ImportSink: Send + Sync {
    /// Creates a sprint with default options.
    async fn create_sprint(&self, name: &str) -> TrackerResult<Option<SprintId>>;

    /// Creates a task in the given sprint, or in backlog for `None`.
    async fn create_task(
        &self,
        title: &str,
        sprint_id: Option<SprintId>,
        options: CreateTaskOptions,
    ) -> TrackerResult<Option<TaskId>>;
}

#[async_trait]
impl ImportSink for TrackerService {
    async fn create_sprint(&self, name: &str) -> TrackerResult<Option<SprintId>> {
        Self::create_sprint(self, name, CreateSprintOptions::default()).await
    }

    async fn create_task(
        &self,
        title: &str,
        sprint_id: Option<SprintId>,
        options: CreateTaskOptions,
    ) -> TrackerResult<Option<TaskId>> {
        Self::create_task(self, title, sprint_id.as_ref(), options).await
    }
}

/// Import that had nothing to do.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ImportError {
    /// The text had no data rows and no warnings.
    #[error("No data rows to import.")]
    NoRows,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Sprints newly created.
    pub sprints_created: usize,
    /// Tasks created.
    pub tasks_created: usize,
    /// Parser warnings, unchanged.
    pub errors: Vec<ParseWarning>,
}

impl ImportSummary {
    /// Returns `true` when anything was created.
    #[must_use]
    pub const fn imported_anything(&self) -> bool {
        self.sprints_created > 0 || self.tasks_created > 0
    }
}

fn task_options(row: &ImportRow) -> CreateTaskOptions {
    let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_owned());
    CreateTaskOptions {
        module: non_empty(&row.module),
        role: non_empty(&row.role),
        priority: non_empty(&row.priority),
        notes: non_empty(&row.notes),
        ..CreateTaskOptions::default()
    }
}

/// Parses `text` and creates its missing sprints and all of its tasks.
///
/// Sprints are matched to `existing_sprints` by exact name. Creations run
/// one at a time; a failed or id-less creation is logged and left out of the
/// counts, and the run continues. Nothing is rolled back.
///
/// # Errors
///
/// Returns [`ImportError::NoRows`] when the text holds no data rows and
/// produced no warnings.
pub async fn run_import<S>(
    sink: &S,
    text: &str,
    existing_sprints: &[Sprint],
) -> Result<ImportSummary, ImportError>
where
    S: ImportSink + ?Sized,
{
    let parsed = parse_import_csv(text);
    if parsed.rows.is_empty() {
        if parsed.errors.is_empty() {
            return Err(ImportError::NoRows);
        }
        return Ok(ImportSummary {
            errors: parsed.errors,
            ..ImportSummary::default()
        });
    }

    let mut name_to_id: HashMap<&str, SprintId> = existing_sprints
        .iter()
        .map(|sprint| (sprint.name.as_str(), sprint.id.clone()))
        .collect();

    let mut sprints_created = 0;
    for name in &parsed.sprint_names {
        if name_to_id.contains_key(name.as_str()) {
            continue;
        }
        match sink.create_sprint(name).await {
            Ok(Some(id)) => {
                name_to_id.insert(name.as_str(), id);
                sprints_created += 1;
            }
            Ok(None) => tracing::warn!(sprint = %name, "sprint creation returned no id"),
            Err(err) => tracing::warn!(sprint = %name, error = %err, "sprint creation failed"),
        }
    }

    let mut tasks_created = 0;
    for row in &parsed.rows {
        let sprint_id = if row.sprint.is_empty() {
            None
        } else {
            name_to_id.get(row.sprint.as_str()).cloned()
        };
        match sink.create_task(&row.task, sprint_id, task_options(row)).await {
            Ok(Some(_)) => tasks_created += 1,
            Ok(None) => tracing::warn!(task = %row.task, "task creation returned no id"),
            Err(err) => tracing::warn!(task = %row.task, error = %err, "task creation failed"),
        }
    }

    tracing::info!(
        sprints_created,
        tasks_created,
        warnings = parsed.errors.len(),
        "import finished"
    );
    Ok(ImportSummary {
        sprints_created,
        tasks_created,
        errors: parsed.errors,
    })
}
