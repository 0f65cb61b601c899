//! Port contracts for the hosted backend.
//!
//! Ports define provider-agnostic interfaces used by the tracker services.

pub mod auth;
pub mod document_store;
pub mod subscription;

pub use auth::{AuthError, AuthListener, AuthProvider, AuthResult};
pub use document_store::{DocumentStore, SnapshotListener, StoreError, StoreResult};
pub use subscription::Subscription;
