//! Task aggregate and its create/update payloads.

use super::{EpochMillis, FieldPatch, SprintId, TaskId, TaskStatus, UserId};
use serde::{Deserialize, Serialize};

/// A task as read from the backend.
///
/// The completion flag is not stored separately: [`Task::done`] is derived
/// from the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    sprint_id: Option<SprintId>,
    created_at: EpochMillis,
    module: Option<String>,
    role: Option<String>,
    priority: Option<String>,
    notes: Option<String>,
    start_date: Option<EpochMillis>,
    end_date: Option<EpochMillis>,
    assigned_to: Option<UserId>,
    description: Option<String>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Normalised status.
    pub status: TaskStatus,
    /// Owning sprint; `None` means backlog.
    pub sprint_id: Option<SprintId>,
    /// Creation time.
    pub created_at: EpochMillis,
    /// Module or area label.
    pub module: Option<String>,
    /// Responsible role label.
    pub role: Option<String>,
    /// Priority label.
    pub priority: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned end.
    pub end_date: Option<EpochMillis>,
    /// Assigned user.
    pub assigned_to: Option<UserId>,
    /// Rich-text description as opaque HTML.
    pub description: Option<String>,
}

impl Task {
    /// Reconstructs a task from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            sprint_id: data.sprint_id,
            created_at: data.created_at,
            module: data.module,
            role: data.role,
            priority: data.priority,
            notes: data.notes,
            start_date: data.start_date,
            end_date: data.end_date,
            assigned_to: data.assigned_to,
            description: data.description,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns `true` iff the status is `done`.
    #[must_use]
    pub const fn done(&self) -> bool {
        self.status.is_done()
    }

    /// Returns the owning sprint, or `None` for backlog.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<&SprintId> {
        self.sprint_id.as_ref()
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> EpochMillis {
        self.created_at
    }

    /// Returns the module label.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Returns the role label.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns the priority label.
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the planned start.
    #[must_use]
    pub const fn start_date(&self) -> Option<EpochMillis> {
        self.start_date
    }

    /// Returns the planned end.
    #[must_use]
    pub const fn end_date(&self) -> Option<EpochMillis> {
        self.end_date
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    /// Returns the description HTML exactly as stored.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Optional fields for task creation.
///
/// Unset fields are omitted from the stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskOptions {
    /// Module or area label.
    pub module: Option<String>,
    /// Responsible role label.
    pub role: Option<String>,
    /// Priority label.
    pub priority: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned end.
    pub end_date: Option<EpochMillis>,
    /// Assigned user.
    pub assigned_to: Option<UserId>,
    /// Description HTML.
    pub description: Option<String>,
}

impl CreateTaskOptions {
    /// Starts with every optional field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module label.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Sets the role label.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the planned start and end.
    #[must_use]
    pub fn with_dates(
        mut self,
        start_date: Option<EpochMillis>,
        end_date: Option<EpochMillis>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Assigns the task.
    #[must_use]
    pub fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Sets the description HTML.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial task update from the detail editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New title, if changing.
    pub title: Option<String>,
    /// New description HTML, if changing; stored verbatim.
    pub description: Option<String>,
    /// Start date change.
    pub start_date: FieldPatch<EpochMillis>,
    /// End date change.
    pub end_date: FieldPatch<EpochMillis>,
    /// Assignee change.
    pub assigned_to: FieldPatch<UserId>,
}

impl TaskUpdate {
    /// Starts an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description HTML.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets or clears the start date.
    #[must_use]
    pub fn with_start_date(mut self, start_date: Option<EpochMillis>) -> Self {
        self.start_date = FieldPatch::from_option(start_date);
        self
    }

    /// Sets or clears the end date.
    #[must_use]
    pub fn with_end_date(mut self, end_date: Option<EpochMillis>) -> Self {
        self.end_date = FieldPatch::from_option(end_date);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub fn with_assignee(mut self, user: Option<UserId>) -> Self {
        self.assigned_to = FieldPatch::from_option(user);
        self
    }

    /// Returns `true` when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_date.is_keep()
            && self.end_date.is_keep()
            && self.assigned_to.is_keep()
    }
}
