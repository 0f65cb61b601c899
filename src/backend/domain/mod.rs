//! Value types shared by the backend ports.
//!
//! These types describe documents, writes, queries and authenticated users
//! without committing to any particular hosted provider.

mod auth;
mod document;
mod query;
mod timestamp;

pub use auth::AuthUser;
pub use document::{Document, DocumentId, DocumentWrite, FieldWrite};
pub use query::{Direction, FieldFilter, OrderBy, Query};
pub use timestamp::{Timestamp, normalize_millis};
