//! Identifier types for the tracker domain.
//!
//! Identifiers are generated by the backend, so they wrap opaque strings.

use crate::backend::domain::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! document_backed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the backend document identifier.
            #[must_use]
            pub fn to_document_id(&self) -> DocumentId {
                DocumentId::new(self.0.clone())
            }
        }

        impl From<DocumentId> for $name {
            fn from(id: DocumentId) -> Self {
                Self(id.into_inner())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

document_backed_id!(
    /// Identifier of a sprint document.
    SprintId
);

document_backed_id!(
    /// Identifier of a task document.
    TaskId
);

document_backed_id!(
    /// Identifier of a user; equal to the auth provider uid.
    UserId
);
