//! Sprint list with its mutations.

use super::LiveCollection;
use crate::tracker::{
    domain::{CreateSprintOptions, Sprint, SprintId, SprintUpdate},
    services::{TrackerResult, TrackerService},
};

/// Live sprint list, oldest first.
#[derive(Debug)]
pub struct SprintsView {
    tracker: TrackerService,
    sprints: LiveCollection<Sprint>,
}

impl SprintsView {
    /// Subscribes to all sprints.
    ///
    /// # Errors
    ///
    /// Returns the store error when the subscription cannot be registered.
    pub fn open(tracker: &TrackerService) -> TrackerResult<Self> {
        let sprints = LiveCollection::open(|publisher| {
            tracker.subscribe_sprints(move |snapshot| publisher.publish(snapshot))
        })?;
        Ok(Self {
            tracker: tracker.clone(),
            sprints,
        })
    }

    /// Returns the latest sprints.
    #[must_use]
    pub fn sprints(&self) -> Vec<Sprint> {
        self.sprints.current()
    }

    /// Returns the underlying live collection.
    #[must_use]
    pub const fn collection(&self) -> &LiveCollection<Sprint> {
        &self.sprints
    }

    /// Creates a sprint.
    ///
    /// # Errors
    ///
    /// Returns the store error when the write fails.
    pub async fn add_sprint(
        &self,
        name: &str,
        options: CreateSprintOptions,
    ) -> TrackerResult<Option<SprintId>> {
        self.tracker.create_sprint(name, options).await
    }

    /// Deletes a sprint after moving its tasks to backlog.
    ///
    /// # Errors
    ///
    /// Returns the store error when a read or write fails.
    pub async fn remove_sprint(&self, sprint_id: &SprintId) -> TrackerResult<usize> {
        self.tracker
            .delete_sprint_and_move_tasks_to_backlog(sprint_id)
            .await
    }

    /// Renames or re-dates a sprint.
    ///
    /// # Errors
    ///
    /// Returns the store error when the write fails.
    pub async fn update_sprint(
        &self,
        sprint_id: &SprintId,
        update: &SprintUpdate,
    ) -> TrackerResult<()> {
        self.tracker.update_sprint(sprint_id, update).await
    }
}
