//! Document database port: CRUD plus live query subscriptions.

use super::Subscription;
use crate::backend::domain::{Document, DocumentId, DocumentWrite, Query};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Callback receiving the full result set of a live query.
pub type SnapshotListener = Arc<dyn Fn(Vec<Document>) + Send + Sync>;

/// Document database contract.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document with a generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the write fails.
    async fn add(&self, collection: &str, write: DocumentWrite) -> StoreResult<DocumentId>;

    /// Creates or replaces the document with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the write fails.
    async fn set(&self, collection: &str, id: &DocumentId, write: DocumentWrite)
    -> StoreResult<()>;

    /// Reads a single document.
    ///
    /// Returns `None` when the document does not exist.
    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>>;

    /// Merges fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        write: DocumentWrite,
    ) -> StoreResult<()>;

    /// Deletes a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &DocumentId) -> StoreResult<()>;

    /// Runs a query once and returns the current result set.
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>>;

    /// Registers a standing query.
    ///
    /// The listener is called immediately with the current results and again
    /// with the full result set after every change to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the registration fails.
    fn subscribe(&self, query: Query, listener: SnapshotListener) -> StoreResult<Subscription>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("document not found: {collection}/{id}")]
    NotFound {
        /// Collection name.
        collection: String,
        /// Document identifier.
        id: DocumentId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Builds a not-found error for the addressed document.
    pub fn not_found(collection: &str, id: &DocumentId) -> Self {
        Self::NotFound {
            collection: collection.to_owned(),
            id: id.clone(),
        }
    }
}
