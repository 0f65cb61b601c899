//! Sprint: a named, optionally time-bounded group of tasks.

use super::{EpochMillis, FieldPatch, SprintId};
use serde::{Deserialize, Serialize};

/// A sprint as read from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Sprint identifier.
    pub id: SprintId,
    /// Display name; import matches sprints by exact name.
    pub name: String,
    /// Creation time.
    pub created_at: EpochMillis,
    /// Planned start, if set.
    pub start_date: Option<EpochMillis>,
    /// Planned end, if set.
    pub end_date: Option<EpochMillis>,
}

/// Optional fields for sprint creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateSprintOptions {
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned end.
    pub end_date: Option<EpochMillis>,
}

/// Partial sprint update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SprintUpdate {
    /// New name, if changing.
    pub name: Option<String>,
    /// Start date change.
    pub start_date: FieldPatch<EpochMillis>,
    /// End date change.
    pub end_date: FieldPatch<EpochMillis>,
}

impl SprintUpdate {
    /// Starts an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the sprint.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
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

    /// Returns `true` when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_date.is_keep() && self.end_date.is_keep()
    }
}
