//! In-memory document store with live query subscriptions.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use uuid::Uuid;

use crate::backend::{
    domain::{Document, DocumentId, DocumentWrite, FieldWrite, Query, Timestamp},
    ports::{DocumentStore, SnapshotListener, StoreError, StoreResult, Subscription},
};

/// Thread-safe in-memory document store.
///
/// Behaves like a hosted document database: identifiers are generated on
/// `add`, server timestamps are stamped from the injected clock, and every
/// write re-runs the standing queries registered on the written collection.
///
/// Each write is given a store revision under the state lock. A listener is
/// called for one registration at a time and only with snapshots newer than
/// the last one it received, so concurrent writers never leave it holding a
/// stale result set. Listeners must not write to the store synchronously.
pub struct InMemoryDocumentStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<StoreState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> std::fmt::Debug for InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct StoreState {
    collections: HashMap<String, BTreeMap<DocumentId, StoredDocument>>,
    next_sequence: u64,
    revision: u64,
    listeners: HashMap<u64, Registration>,
    next_listener_id: u64,
}

impl std::fmt::Debug for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreState")
            .field("collections", &self.collections.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
struct StoredDocument {
    sequence: u64,
    fields: Map<String, Value>,
}

struct Registration {
    query: Query,
    delivery: Arc<Delivery>,
}

/// Serialises snapshot delivery to one listener.
struct Delivery {
    listener: SnapshotListener,
    last_revision: Mutex<Option<u64>>,
}

impl Delivery {
    fn new(listener: SnapshotListener) -> Self {
        Self {
            listener,
            last_revision: Mutex::new(None),
        }
    }

    /// Calls the listener unless a snapshot at `revision` or later has
    /// already been delivered.
    fn deliver(&self, revision: u64, documents: Vec<Document>) {
        let mut last = self
            .last_revision
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if last.is_some_and(|delivered| delivered >= revision) {
            return;
        }
        (self.listener)(documents);
        *last = Some(revision);
    }
}

/// Snapshot taken under the state lock, delivered once it is released.
struct PendingNotification {
    delivery: Arc<Delivery>,
    revision: u64,
    documents: Vec<Document>,
}

impl InMemoryDocumentStore<DefaultClock> {
    /// Creates an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryDocumentStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamped by the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            clock,
        }
    }

    /// Returns the number of registered live queries.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.listeners.len())
    }

    fn resolve(&self, write: &DocumentWrite) -> Map<String, Value> {
        let now = Timestamp::from_datetime(self.clock.utc()).to_value();
        write
            .iter()
            .map(|(field, value)| {
                let resolved = match value {
                    FieldWrite::Value(inner) => inner.clone(),
                    FieldWrite::ServerTimestamp => now.clone(),
                };
                (field.to_owned(), resolved)
            })
            .collect()
    }

    fn write_state(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn read_state(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn run_query(state: &StoreState, query: &Query) -> Vec<Document> {
    let Some(documents) = state.collections.get(query.collection_name()) else {
        return Vec::new();
    };
    let mut matching: Vec<(&DocumentId, &StoredDocument)> = documents
        .iter()
        .filter(|(_, stored)| query.matches(&stored.fields))
        .collect();
    matching.sort_by(|(_, left), (_, right)| {
        query
            .compare(&left.fields, &right.fields)
            .then(left.sequence.cmp(&right.sequence))
    });
    matching
        .into_iter()
        .map(|(id, stored)| Document::new(id.clone(), stored.fields.clone()))
        .collect()
}

fn pending_for(state: &mut StoreState, collection: &str) -> Vec<PendingNotification> {
    state.revision += 1;
    let revision = state.revision;
    state
        .listeners
        .values()
        .filter(|registration| registration.query.collection_name() == collection)
        .map(|registration| PendingNotification {
            delivery: Arc::clone(&registration.delivery),
            revision,
            documents: run_query(state, &registration.query),
        })
        .collect()
}

fn notify(pending: Vec<PendingNotification>) {
    for notification in pending {
        notification
            .delivery
            .deliver(notification.revision, notification.documents);
    }
}

fn next_sequence(state: &mut StoreState) -> u64 {
    state.next_sequence += 1;
    state.next_sequence
}

#[async_trait]
impl<C> DocumentStore for InMemoryDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    async fn add(&self, collection: &str, write: DocumentWrite) -> StoreResult<DocumentId> {
        let fields = self.resolve(&write);
        let id = DocumentId::new(Uuid::new_v4().simple().to_string());
        let pending = {
            let mut state = self.write_state()?;
            let sequence = next_sequence(&mut state);
            state
                .collections
                .entry(collection.to_owned())
                .or_default()
                .insert(id.clone(), StoredDocument { sequence, fields });
            pending_for(&mut state, collection)
        };
        notify(pending);
        Ok(id)
    }

    async fn set(
        &self,
        collection: &str,
        id: &DocumentId,
        write: DocumentWrite,
    ) -> StoreResult<()> {
        let fields = self.resolve(&write);
        let pending = {
            let mut state = self.write_state()?;
            let existing_sequence = state
                .collections
                .get(collection)
                .and_then(|documents| documents.get(id))
                .map(|stored| stored.sequence);
            let sequence = match existing_sequence {
                Some(sequence) => sequence,
                None => next_sequence(&mut state),
            };
            state
                .collections
                .entry(collection.to_owned())
                .or_default()
                .insert(id.clone(), StoredDocument { sequence, fields });
            pending_for(&mut state, collection)
        };
        notify(pending);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        let state = self.read_state()?;
        Ok(state
            .collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|stored| Document::new(id.clone(), stored.fields.clone())))
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        write: DocumentWrite,
    ) -> StoreResult<()> {
        let fields = self.resolve(&write);
        let pending = {
            let mut state = self.write_state()?;
            let stored = state
                .collections
                .get_mut(collection)
                .and_then(|documents| documents.get_mut(id))
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            stored.fields.extend(fields);
            pending_for(&mut state, collection)
        };
        notify(pending);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> StoreResult<()> {
        let pending = {
            let mut state = self.write_state()?;
            let removed = state
                .collections
                .get_mut(collection)
                .and_then(|documents| documents.remove(id));
            if removed.is_none() {
                return Ok(());
            }
            pending_for(&mut state, collection)
        };
        notify(pending);
        Ok(())
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        let state = self.read_state()?;
        Ok(run_query(&state, query))
    }

    fn subscribe(&self, query: Query, listener: SnapshotListener) -> StoreResult<Subscription> {
        let delivery = Arc::new(Delivery::new(listener));
        let (listener_id, initial) = {
            let mut state = self.write_state()?;
            state.next_listener_id += 1;
            let listener_id = state.next_listener_id;
            let initial = PendingNotification {
                delivery: Arc::clone(&delivery),
                revision: state.revision,
                documents: run_query(&state, &query),
            };
            state
                .listeners
                .insert(listener_id, Registration { query, delivery });
            (listener_id, initial)
        };
        notify(vec![initial]);

        let weak_state: Weak<RwLock<StoreState>> = Arc::downgrade(&self.state);
        Ok(Subscription::new(move || {
            if let Some(state) = weak_state.upgrade() {
                if let Ok(mut guard) = state.write() {
                    guard.listeners.remove(&listener_id);
                }
            }
        }))
    }
}
