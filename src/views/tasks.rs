//! Tasks of one sprint, or of backlog, with their mutations.

use super::LiveCollection;
use crate::board::Board;
use crate::tracker::{
    domain::{
        CreateTaskOptions, EpochMillis, SprintId, Task, TaskId, TaskStatus, TaskUpdate, UserId,
    },
    services::{TrackerResult, TrackerService},
};

/// Live task list scoped to a sprint, newest first.
#[derive(Debug)]
pub struct TasksView {
    tracker: TrackerService,
    sprint_id: Option<SprintId>,
    tasks: LiveCollection<Task>,
}

impl TasksView {
    /// Subscribes to the tasks of `sprint_id`, or backlog for `None`.
    ///
    /// # Errors
    ///
    /// Returns the store error when the subscription cannot be registered.
    pub fn open(tracker: &TrackerService, sprint_id: Option<SprintId>) -> TrackerResult<Self> {
        let tasks = LiveCollection::open(|publisher| {
            tracker.subscribe_tasks(sprint_id.as_ref(), move |snapshot| {
                publisher.publish(snapshot);
            })
        })?;
        Ok(Self {
            tracker: tracker.clone(),
            sprint_id,
            tasks,
        })
    }

    /// Returns the sprint this view is scoped to.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<&SprintId> {
        self.sprint_id.as_ref()
    }

    /// Returns the latest tasks.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.current()
    }

    /// Returns the underlying live collection.
    #[must_use]
    pub const fn collection(&self) -> &LiveCollection<Task> {
        &self.tasks
    }

    /// Groups the latest tasks into kanban columns.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::from_tasks(self.tasks())
    }

    /// Creates a task in this view's sprint.
    ///
    /// # Errors
    ///
    /// Returns [`crate::tracker::services::TrackerError::UnknownSprint`] when
    /// the sprint has been deleted, or the store error.
    pub async fn add_task(
        &self,
        title: &str,
        start_date: Option<EpochMillis>,
        end_date: Option<EpochMillis>,
    ) -> TrackerResult<Option<TaskId>> {
        let options = CreateTaskOptions::new().with_dates(start_date, end_date);
        self.tracker
            .create_task(title, self.sprint_id.as_ref(), options)
            .await
    }

    /// Marks a task done or reopens it.
    ///
    /// # Errors
    ///
    /// Returns the store error when the write fails.
    pub async fn toggle_task(&self, task_id: &TaskId, done: bool) -> TrackerResult<()> {
        self.tracker.toggle_task(task_id, done).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns the store error when the delete fails.
    pub async fn remove_task(&self, task_id: &TaskId) -> TrackerResult<()> {
        self.tracker.delete_task(task_id).await
    }

    /// Moves a task to another status column.
    ///
    /// # Errors
    ///
    /// Returns the store error when the write fails.
    pub async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> TrackerResult<()> {
        self.tracker.update_task_status(task_id, status).await
    }

    /// Sets or clears a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns the store error when the write fails.
    pub async fn update_task_assignment(
        &self,
        task_id: &TaskId,
        user: Option<&UserId>,
    ) -> TrackerResult<()> {
        self.tracker.update_task_assignment(task_id, user).await
    }

    /// Saves edits from the task detail editor.
    ///
    /// # Errors
    ///
    /// Returns the store error when the write fails.
    pub async fn update_task(&self, task_id: &TaskId, update: &TaskUpdate) -> TrackerResult<()> {
        self.tracker.update_task(task_id, update).await
    }
}
