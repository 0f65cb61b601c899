//! Sprint and task tracking.
//!
//! Tasks move through five kanban statuses and may belong to a sprint and be
//! assigned to a user. Persistence is delegated to the backend document
//! store; this module shapes documents into domain values and back.
//!
//! - Domain types in [`domain`]
//! - Document mapping in [`adapters`]
//! - Data access and auth services in [`services`]

pub mod adapters;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
