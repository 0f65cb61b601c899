//! Mapping between backend documents and tracker domain values.
//!
//! Read paths are lenient: missing strings become empty, timestamps accept a
//! raw millisecond number or a backend timestamp object, and a task without
//! a valid status is given one from its legacy `done` flag.

use serde_json::Value;

use crate::backend::domain::{Document, DocumentWrite, normalize_millis};
use crate::tracker::domain::{
    AppUser, CreateSprintOptions, CreateTaskOptions, EpochMillis, FieldPatch, PersistedTaskData,
    Sprint, SprintId, SprintUpdate, Task, TaskStatus, TaskUpdate, UserId,
};

/// Collection holding task documents.
pub const TASKS: &str = "tasks";
/// Collection holding sprint documents.
pub const SPRINTS: &str = "sprints";
/// Collection holding user profile documents.
pub const USERS: &str = "users";

/// Document field names.
pub mod fields {
    /// Task title.
    pub const TITLE: &str = "title";
    /// Legacy completion flag, kept in step with `status`.
    pub const DONE: &str = "done";
    /// Task status.
    pub const STATUS: &str = "status";
    /// Owning sprint id or `null`.
    pub const SPRINT_ID: &str = "sprintId";
    /// Server-stamped creation time.
    pub const CREATED_AT: &str = "createdAt";
    /// Task module label.
    pub const MODULE: &str = "module";
    /// Task role label.
    pub const ROLE: &str = "role";
    /// Task priority label.
    pub const PRIORITY: &str = "priority";
    /// Task notes.
    pub const NOTES: &str = "notes";
    /// Planned start.
    pub const START_DATE: &str = "startDate";
    /// Planned end.
    pub const END_DATE: &str = "endDate";
    /// Assigned user id.
    pub const ASSIGNED_TO: &str = "assignedTo";
    /// Description HTML.
    pub const DESCRIPTION: &str = "description";
    /// Sprint name.
    pub const NAME: &str = "name";
    /// User email.
    pub const EMAIL: &str = "email";
    /// User display name.
    pub const DISPLAY_NAME: &str = "displayName";
}

fn millis_field(document: &Document, name: &str) -> Option<EpochMillis> {
    document
        .field(name)
        .and_then(normalize_millis)
        .map(EpochMillis::new)
}

fn created_at(document: &Document) -> EpochMillis {
    millis_field(document, fields::CREATED_AT).unwrap_or_default()
}

fn string_field(document: &Document, name: &str) -> String {
    document.str_field(name).unwrap_or_default().to_owned()
}

fn optional_string(document: &Document, name: &str) -> Option<String> {
    document.str_field(name).map(str::to_owned)
}

fn millis_value(millis: &EpochMillis) -> Value {
    Value::from(millis.value())
}

fn patch_value<T>(patch: &FieldPatch<T>, encode: impl Fn(&T) -> Value) -> Option<Value> {
    match patch {
        FieldPatch::Keep => None,
        FieldPatch::Clear => Some(Value::Null),
        FieldPatch::Set(value) => Some(encode(value)),
    }
}

/// Maps a sprint document.
#[must_use]
pub fn sprint_from_document(document: &Document) -> Sprint {
    Sprint {
        id: document.id().clone().into(),
        name: string_field(document, fields::NAME),
        created_at: created_at(document),
        start_date: millis_field(document, fields::START_DATE),
        end_date: millis_field(document, fields::END_DATE),
    }
}

/// Maps a task document, normalising status and timestamps.
#[must_use]
pub fn task_from_document(document: &Document) -> Task {
    let status = TaskStatus::normalize(
        document.str_field(fields::STATUS),
        document.bool_field(fields::DONE).unwrap_or(false),
    );
    Task::from_persisted(PersistedTaskData {
        id: document.id().clone().into(),
        title: string_field(document, fields::TITLE),
        status,
        sprint_id: document.str_field(fields::SPRINT_ID).map(SprintId::new),
        created_at: created_at(document),
        module: optional_string(document, fields::MODULE),
        role: optional_string(document, fields::ROLE),
        priority: optional_string(document, fields::PRIORITY),
        notes: optional_string(document, fields::NOTES),
        start_date: millis_field(document, fields::START_DATE),
        end_date: millis_field(document, fields::END_DATE),
        assigned_to: document.str_field(fields::ASSIGNED_TO).map(UserId::new),
        description: optional_string(document, fields::DESCRIPTION),
    })
}

/// Maps a user profile document.
#[must_use]
pub fn user_from_document(document: &Document) -> AppUser {
    AppUser {
        id: document.id().clone().into(),
        email: string_field(document, fields::EMAIL),
        display_name: string_field(document, fields::DISPLAY_NAME),
        created_at: created_at(document),
    }
}

/// Write creating a sprint.
#[must_use]
pub fn new_sprint_write(name: &str, options: CreateSprintOptions) -> DocumentWrite {
    DocumentWrite::new()
        .set(fields::NAME, name)
        .server_timestamp(fields::CREATED_AT)
        .set_opt(fields::START_DATE, options.start_date.map(EpochMillis::value))
        .set_opt(fields::END_DATE, options.end_date.map(EpochMillis::value))
}

/// Write applying a sprint update.
#[must_use]
pub fn sprint_update_write(update: &SprintUpdate) -> DocumentWrite {
    DocumentWrite::new()
        .set_opt(fields::NAME, update.name.clone())
        .set_opt(
            fields::START_DATE,
            patch_value(&update.start_date, millis_value),
        )
        .set_opt(fields::END_DATE, patch_value(&update.end_date, millis_value))
}

/// Write creating a task in `backlog`.
#[must_use]
pub fn new_task_write(
    title: &str,
    sprint_id: Option<&SprintId>,
    options: CreateTaskOptions,
) -> DocumentWrite {
    let status = TaskStatus::Backlog;
    DocumentWrite::new()
        .set(fields::TITLE, title)
        .set(fields::DONE, status.is_done())
        .set(fields::STATUS, status.as_str())
        .set(fields::SPRINT_ID, sprint_id_value(sprint_id))
        .server_timestamp(fields::CREATED_AT)
        .set_opt(fields::MODULE, options.module)
        .set_opt(fields::ROLE, options.role)
        .set_opt(fields::PRIORITY, options.priority)
        .set_opt(fields::NOTES, options.notes)
        .set_opt(fields::START_DATE, options.start_date.map(EpochMillis::value))
        .set_opt(fields::END_DATE, options.end_date.map(EpochMillis::value))
        .set_opt(
            fields::ASSIGNED_TO,
            options.assigned_to.map(|user| user.as_str().to_owned()),
        )
        .set_opt(fields::DESCRIPTION, options.description)
}

/// Write applying a task update; empty when the update changes nothing.
#[must_use]
pub fn task_update_write(update: &TaskUpdate) -> DocumentWrite {
    DocumentWrite::new()
        .set_opt(fields::TITLE, update.title.clone())
        .set_opt(fields::DESCRIPTION, update.description.clone())
        .set_opt(
            fields::START_DATE,
            patch_value(&update.start_date, millis_value),
        )
        .set_opt(fields::END_DATE, patch_value(&update.end_date, millis_value))
        .set_opt(
            fields::ASSIGNED_TO,
            patch_value(&update.assigned_to, |user| Value::from(user.as_str())),
        )
}

/// Write setting a status together with the matching completion flag.
#[must_use]
pub fn status_write(status: TaskStatus) -> DocumentWrite {
    DocumentWrite::new()
        .set(fields::STATUS, status.as_str())
        .set(fields::DONE, status.is_done())
}

/// Write moving a task to a sprint or to backlog.
#[must_use]
pub fn sprint_assignment_write(sprint_id: Option<&SprintId>) -> DocumentWrite {
    DocumentWrite::new().set(fields::SPRINT_ID, sprint_id_value(sprint_id))
}

/// Write setting or clearing the assignee.
#[must_use]
pub fn assignment_write(user: Option<&UserId>) -> DocumentWrite {
    DocumentWrite::new().set(
        fields::ASSIGNED_TO,
        user.map_or(Value::Null, |id| Value::from(id.as_str())),
    )
}

/// Write creating a user profile.
#[must_use]
pub fn new_user_write(email: &str, display_name: &str) -> DocumentWrite {
    DocumentWrite::new()
        .set(fields::EMAIL, email)
        .set(fields::DISPLAY_NAME, display_name)
        .server_timestamp(fields::CREATED_AT)
}

/// Write changing a user's display name.
#[must_use]
pub fn display_name_write(display_name: &str) -> DocumentWrite {
    DocumentWrite::new().set(fields::DISPLAY_NAME, display_name)
}

/// Encodes a sprint reference, `null` meaning backlog.
#[must_use]
pub fn sprint_id_value(sprint_id: Option<&SprintId>) -> Value {
    sprint_id.map_or(Value::Null, |id| Value::from(id.as_str()))
}
