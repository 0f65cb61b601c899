//! Documents, identifiers and field writes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Backend-generated document identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
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

    /// Consumes the identifier, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored document as returned by reads and snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    fields: Map<String, Value>,
}

impl Document {
    /// Creates a document from its identifier and field map.
    #[must_use]
    pub const fn new(id: DocumentId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the full field map.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a field value, treating an explicit `null` as absent.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// Returns a string field, if present and a string.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Returns a boolean field, if present and a boolean.
    #[must_use]
    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(Value::as_bool)
    }
}

/// A single field assignment within a [`DocumentWrite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWrite {
    /// Stores the given JSON value (including `null`).
    Value(Value),
    /// Asks the backend to stamp the field with its own clock.
    ServerTimestamp,
}

/// Set of field assignments applied by `add`, `set` and `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentWrite {
    fields: BTreeMap<String, FieldWrite>,
}

impl DocumentWrite {
    /// Creates an empty write.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a value to a field.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .insert(field.into(), FieldWrite::Value(value.into()));
        self
    }

    /// Assigns an explicit `null` to a field.
    #[must_use]
    pub fn set_null(self, field: impl Into<String>) -> Self {
        self.set(field, Value::Null)
    }

    /// Assigns a value when present and leaves the field untouched otherwise.
    #[must_use]
    pub fn set_opt<V: Into<Value>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(inner) => self.set(field, inner),
            None => self,
        }
    }

    /// Marks a field to receive the backend's current timestamp.
    #[must_use]
    pub fn server_timestamp(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FieldWrite::ServerTimestamp);
        self
    }

    /// Returns `true` when the write assigns no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the write for a single field, if assigned.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldWrite> {
        self.fields.get(field)
    }

    /// Iterates over the field assignments in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldWrite)> {
        self.fields.iter().map(|(name, write)| (name.as_str(), write))
    }
}
