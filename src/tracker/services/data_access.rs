//! Data access service: live collections and mutations for sprints, tasks
//! and users.

use std::sync::Arc;

use thiserror::Error;

use crate::backend::{
    Backend,
    domain::{Direction, Document, Query},
    ports::{DocumentStore, SnapshotListener, StoreError, Subscription},
};
use crate::tracker::{
    adapters::documents::{
        self, SPRINTS, TASKS, USERS, fields, sprint_from_document, task_from_document,
        user_from_document,
    },
    domain::{
        AppUser, CreateSprintOptions, CreateTaskOptions, Sprint, SprintId, SprintUpdate, Task,
        TaskId, TaskStatus, TaskUpdate, UserId,
    },
};

/// Service-level errors for tracker data access.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Document store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The referenced sprint does not exist.
    #[error("unknown sprint: {0}")]
    UnknownSprint(SprintId),
}

/// Result type for tracker service operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Domain operations over the backend document store.
///
/// When the backend is not configured the service is inert: subscriptions
/// deliver a single empty list and mutations return without effect.
#[derive(Clone, Default)]
pub struct TrackerService {
    store: Option<Arc<dyn DocumentStore>>,
}

impl std::fmt::Debug for TrackerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerService")
            .field("ready", &self.is_ready())
            .finish()
    }
}

fn sprints_query() -> Query {
    Query::collection(SPRINTS).order_by(fields::CREATED_AT, Direction::Ascending)
}

fn tasks_query(sprint_id: Option<&SprintId>) -> Query {
    Query::collection(TASKS)
        .where_eq(fields::SPRINT_ID, documents::sprint_id_value(sprint_id))
        .order_by(fields::CREATED_AT, Direction::Descending)
}

fn all_tasks_query() -> Query {
    Query::collection(TASKS).order_by(fields::CREATED_AT, Direction::Descending)
}

fn users_query() -> Query {
    Query::collection(USERS).order_by(fields::CREATED_AT, Direction::Ascending)
}

impl TrackerService {
    /// Creates a service over the backend's document store, if connected.
    #[must_use]
    pub fn new(backend: &Backend) -> Self {
        Self {
            store: backend.store(),
        }
    }

    /// Creates a service over an explicit store.
    #[must_use]
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Returns `true` when a document store is connected.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    fn connected(&self, operation: &'static str) -> Option<&Arc<dyn DocumentStore>> {
        if self.store.is_none() {
            tracing::debug!(operation, "backend not configured; skipping");
        }
        self.store.as_ref()
    }

    fn subscribe_mapped<T, F>(
        &self,
        query: Query,
        map: fn(&Document) -> T,
        listener: F,
    ) -> TrackerResult<Subscription>
    where
        T: 'static,
        F: Fn(Vec<T>) + Send + Sync + 'static,
    {
        let Some(store) = self.connected("subscribe") else {
            listener(Vec::new());
            return Ok(Subscription::inert());
        };
        let snapshot: SnapshotListener = Arc::new(move |documents: Vec<Document>| {
            listener(documents.iter().map(map).collect());
        });
        Ok(store.subscribe(query, snapshot)?)
    }

    async fn ensure_sprint_exists(
        store: &Arc<dyn DocumentStore>,
        sprint_id: Option<&SprintId>,
    ) -> TrackerResult<()> {
        let Some(id) = sprint_id else {
            return Ok(());
        };
        match store.get(SPRINTS, &id.to_document_id()).await? {
            Some(_) => Ok(()),
            None => Err(TrackerError::UnknownSprint(id.clone())),
        }
    }

    // Sprints

    /// Streams all sprints, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the registration fails.
    pub fn subscribe_sprints(
        &self,
        listener: impl Fn(Vec<Sprint>) + Send + Sync + 'static,
    ) -> TrackerResult<Subscription> {
        self.subscribe_mapped(sprints_query(), sprint_from_document, listener)
    }

    /// Reads all sprints once, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the query fails.
    pub async fn list_sprints(&self) -> TrackerResult<Vec<Sprint>> {
        let Some(store) = self.connected("list_sprints") else {
            return Ok(Vec::new());
        };
        let documents = store.query(&sprints_query()).await?;
        Ok(documents.iter().map(sprint_from_document).collect())
    }

    /// Creates a sprint and returns its identifier.
    ///
    /// Returns `Ok(None)` when the backend is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the write fails.
    pub async fn create_sprint(
        &self,
        name: &str,
        options: CreateSprintOptions,
    ) -> TrackerResult<Option<SprintId>> {
        let Some(store) = self.connected("create_sprint") else {
            return Ok(None);
        };
        let id = store
            .add(SPRINTS, documents::new_sprint_write(name, options))
            .await?;
        tracing::info!(sprint_id = %id, name, "sprint created");
        Ok(Some(id.into()))
    }

    /// Applies a partial sprint update.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the sprint does not exist or the
    /// write fails.
    pub async fn update_sprint(
        &self,
        sprint_id: &SprintId,
        update: &SprintUpdate,
    ) -> TrackerResult<()> {
        let Some(store) = self.connected("update_sprint") else {
            return Ok(());
        };
        if update.is_empty() {
            return Ok(());
        }
        store
            .update(
                SPRINTS,
                &sprint_id.to_document_id(),
                documents::sprint_update_write(update),
            )
            .await?;
        Ok(())
    }

    /// Deletes a sprint document without touching its tasks.
    ///
    /// Prefer [`TrackerService::delete_sprint_and_move_tasks_to_backlog`],
    /// which keeps task sprint references valid.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the delete fails.
    pub async fn delete_sprint(&self, sprint_id: &SprintId) -> TrackerResult<()> {
        let Some(store) = self.connected("delete_sprint") else {
            return Ok(());
        };
        store.delete(SPRINTS, &sprint_id.to_document_id()).await?;
        Ok(())
    }

    /// Moves every task of the sprint to backlog, then deletes the sprint.
    ///
    /// Returns the number of tasks moved.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when a read or write fails; tasks
    /// moved before the failure stay in backlog.
    pub async fn delete_sprint_and_move_tasks_to_backlog(
        &self,
        sprint_id: &SprintId,
    ) -> TrackerResult<usize> {
        let Some(store) = self.connected("delete_sprint_and_move_tasks_to_backlog") else {
            return Ok(0);
        };
        let members = store
            .query(&Query::collection(TASKS).where_eq(
                fields::SPRINT_ID,
                documents::sprint_id_value(Some(sprint_id)),
            ))
            .await?;
        for member in &members {
            store
                .update(TASKS, member.id(), documents::sprint_assignment_write(None))
                .await?;
        }
        store.delete(SPRINTS, &sprint_id.to_document_id()).await?;
        tracing::info!(%sprint_id, moved = members.len(), "sprint deleted; tasks moved to backlog");
        Ok(members.len())
    }

    // Tasks

    /// Streams the tasks of one sprint, or backlog for `None`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the registration fails.
    pub fn subscribe_tasks(
        &self,
        sprint_id: Option<&SprintId>,
        listener: impl Fn(Vec<Task>) + Send + Sync + 'static,
    ) -> TrackerResult<Subscription> {
        self.subscribe_mapped(tasks_query(sprint_id), task_from_document, listener)
    }

    /// Streams every task regardless of sprint, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the registration fails.
    pub fn subscribe_all_tasks(
        &self,
        listener: impl Fn(Vec<Task>) + Send + Sync + 'static,
    ) -> TrackerResult<Subscription> {
        self.subscribe_mapped(all_tasks_query(), task_from_document, listener)
    }

    /// Reads the tasks of one sprint, or backlog for `None`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the query fails.
    pub async fn list_tasks(&self, sprint_id: Option<&SprintId>) -> TrackerResult<Vec<Task>> {
        let Some(store) = self.connected("list_tasks") else {
            return Ok(Vec::new());
        };
        let documents = store.query(&tasks_query(sprint_id)).await?;
        Ok(documents.iter().map(task_from_document).collect())
    }

    /// Reads every task regardless of sprint, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the query fails.
    pub async fn list_all_tasks(&self) -> TrackerResult<Vec<Task>> {
        let Some(store) = self.connected("list_all_tasks") else {
            return Ok(Vec::new());
        };
        let documents = store.query(&all_tasks_query()).await?;
        Ok(documents.iter().map(task_from_document).collect())
    }

    /// Reads one task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the read fails.
    pub async fn get_task(&self, task_id: &TaskId) -> TrackerResult<Option<Task>> {
        let Some(store) = self.connected("get_task") else {
            return Ok(None);
        };
        let document = store.get(TASKS, &task_id.to_document_id()).await?;
        Ok(document.as_ref().map(task_from_document))
    }

    /// Creates a backlog-status task and returns its identifier.
    ///
    /// Returns `Ok(None)` when the backend is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownSprint`] when `sprint_id` names no
    /// sprint, or [`TrackerError::Store`] when the write fails.
    pub async fn create_task(
        &self,
        title: &str,
        sprint_id: Option<&SprintId>,
        options: CreateTaskOptions,
    ) -> TrackerResult<Option<TaskId>> {
        let Some(store) = self.connected("create_task") else {
            return Ok(None);
        };
        Self::ensure_sprint_exists(store, sprint_id).await?;
        let id = store
            .add(TASKS, documents::new_task_write(title, sprint_id, options))
            .await?;
        tracing::debug!(task_id = %id, "task created");
        Ok(Some(id.into()))
    }

    /// Applies a partial task update; an empty update is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the task does not exist or the
    /// write fails.
    pub async fn update_task(&self, task_id: &TaskId, update: &TaskUpdate) -> TrackerResult<()> {
        let Some(store) = self.connected("update_task") else {
            return Ok(());
        };
        if update.is_empty() {
            return Ok(());
        }
        store
            .update(
                TASKS,
                &task_id.to_document_id(),
                documents::task_update_write(update),
            )
            .await?;
        Ok(())
    }

    /// Marks a task done, or reopens it into backlog.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the task does not exist or the
    /// write fails.
    pub async fn toggle_task(&self, task_id: &TaskId, done: bool) -> TrackerResult<()> {
        self.update_task_status(task_id, TaskStatus::from_done(done))
            .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the delete fails.
    pub async fn delete_task(&self, task_id: &TaskId) -> TrackerResult<()> {
        let Some(store) = self.connected("delete_task") else {
            return Ok(());
        };
        store.delete(TASKS, &task_id.to_document_id()).await?;
        Ok(())
    }

    /// Moves a task to a sprint, or to backlog for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownSprint`] when `sprint_id` names no
    /// sprint, or [`TrackerError::Store`] when the write fails.
    pub async fn set_task_sprint(
        &self,
        task_id: &TaskId,
        sprint_id: Option<&SprintId>,
    ) -> TrackerResult<()> {
        let Some(store) = self.connected("set_task_sprint") else {
            return Ok(());
        };
        Self::ensure_sprint_exists(store, sprint_id).await?;
        store
            .update(
                TASKS,
                &task_id.to_document_id(),
                documents::sprint_assignment_write(sprint_id),
            )
            .await?;
        Ok(())
    }

    /// Sets a task's status and the matching completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the task does not exist or the
    /// write fails.
    pub async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> TrackerResult<()> {
        let Some(store) = self.connected("update_task_status") else {
            return Ok(());
        };
        store
            .update(
                TASKS,
                &task_id.to_document_id(),
                documents::status_write(status),
            )
            .await?;
        tracing::debug!(%task_id, status = status.as_str(), "task status updated");
        Ok(())
    }

    /// Sets or clears a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the task does not exist or the
    /// write fails.
    pub async fn update_task_assignment(
        &self,
        task_id: &TaskId,
        user: Option<&UserId>,
    ) -> TrackerResult<()> {
        let Some(store) = self.connected("update_task_assignment") else {
            return Ok(());
        };
        store
            .update(
                TASKS,
                &task_id.to_document_id(),
                documents::assignment_write(user),
            )
            .await?;
        Ok(())
    }

    // Users

    /// Streams all user profiles, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the registration fails.
    pub fn subscribe_users(
        &self,
        listener: impl Fn(Vec<AppUser>) + Send + Sync + 'static,
    ) -> TrackerResult<Subscription> {
        self.subscribe_mapped(users_query(), user_from_document, listener)
    }

    /// Creates the profile document for `user_id` unless one exists.
    ///
    /// Returns `true` when a document was created.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the read or write fails.
    pub async fn ensure_user_doc(
        &self,
        user_id: &UserId,
        email: &str,
        display_name: &str,
    ) -> TrackerResult<bool> {
        let Some(store) = self.connected("ensure_user_doc") else {
            return Ok(false);
        };
        let document_id = user_id.to_document_id();
        if store.get(USERS, &document_id).await?.is_some() {
            return Ok(false);
        }
        store
            .set(
                USERS,
                &document_id,
                documents::new_user_write(email, display_name),
            )
            .await?;
        tracing::info!(%user_id, "user profile created");
        Ok(true)
    }

    /// Changes the display name stored on a user profile.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the profile does not exist or the
    /// write fails.
    pub async fn update_user_profile(
        &self,
        user_id: &UserId,
        display_name: &str,
    ) -> TrackerResult<()> {
        let Some(store) = self.connected("update_user_profile") else {
            return Ok(());
        };
        store
            .update(
                USERS,
                &user_id.to_document_id(),
                documents::display_name_write(display_name),
            )
            .await?;
        Ok(())
    }
}

impl From<&Backend> for TrackerService {
    fn from(backend: &Backend) -> Self {
        Self::new(backend)
    }
}

