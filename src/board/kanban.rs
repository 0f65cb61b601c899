//! Kanban columns and card moves.

use crate::tracker::{
    domain::{Task, TaskId, TaskStatus},
    services::{TrackerResult, TrackerService},
};

/// One status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl Column {
    /// Returns the column's status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.status.label()
    }

    /// Returns the cards in input order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Tasks grouped into the five status columns, in status order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

/// A status write produced by dropping a card on another column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Card being moved.
    pub task_id: TaskId,
    /// Destination status.
    pub status: TaskStatus,
}

/// Plans a card move; dropping onto the card's own column changes nothing.
#[must_use]
pub fn plan_move(task_id: &TaskId, from: TaskStatus, to: TaskStatus) -> Option<StatusChange> {
    (from != to).then(|| StatusChange {
        task_id: task_id.clone(),
        status: to,
    })
}

impl Board {
    /// Groups tasks by status, keeping input order within each column.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns: Vec<Column> = TaskStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                tasks: Vec::new(),
            })
            .collect();
        for task in tasks {
            if let Some(column) = columns
                .iter_mut()
                .find(|column| column.status == task.status())
            {
                column.tasks.push(task);
            }
        }
        Self { columns }
    }

    /// Returns the columns in status order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&Column> {
        self.columns.iter().find(|column| column.status == status)
    }

    /// Returns the total number of cards.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Applies a drag/drop: one status write when the column changes,
    /// nothing otherwise.
    ///
    /// Returns `true` when a write was issued. Concurrent moves of the same
    /// card resolve last write wins.
    ///
    /// # Errors
    ///
    /// Returns the store error when the write fails.
    pub async fn drop_card(
        tracker: &TrackerService,
        task_id: &TaskId,
        from: TaskStatus,
        to: TaskStatus,
    ) -> TrackerResult<bool> {
        let Some(change) = plan_move(task_id, from, to) else {
            return Ok(false);
        };
        tracker
            .update_task_status(&change.task_id, change.status)
            .await?;
        Ok(true)
    }
}
