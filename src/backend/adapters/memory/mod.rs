//! In-memory adapter implementations.
//!
//! These adapters provide thread-safe stand-ins for the hosted backend,
//! suitable for tests, demos and the command-line front end.

mod auth;
mod document_store;

pub use auth::{InMemoryAuthProvider, MIN_PASSWORD_LENGTH};
pub use document_store::InMemoryDocumentStore;
