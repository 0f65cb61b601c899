//! Adapters between the tracker domain and backend documents.

pub mod documents;

pub use documents::{SPRINTS, TASKS, USERS};
