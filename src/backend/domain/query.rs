//! Collection queries: equality filters and a single ordering.

use super::Timestamp;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Sort direction for [`OrderBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

/// Equality constraint on a single field.
///
/// A `null` value matches documents that store an explicit `null`, not
/// documents that lack the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    /// Field name.
    pub field: String,
    /// Required value.
    pub value: Value,
}

/// Ordering applied to query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field name to order by.
    pub field: String,
    /// Sort direction.
    pub direction: Direction,
}

/// A standing or one-shot query against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    collection: String,
    filters: Vec<FieldFilter>,
    order_by: Option<OrderBy>,
}

impl Query {
    /// Starts a query over every document in `collection`.
    #[must_use]
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
        }
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Sets the result ordering.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Returns the target collection name.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// Returns the equality filters.
    #[must_use]
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Returns the ordering, if any.
    #[must_use]
    pub const fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// Returns `true` when a document's fields satisfy every filter and carry
    /// the ordering field (documents without it are excluded from ordered
    /// queries).
    #[must_use]
    pub fn matches(&self, fields: &Map<String, Value>) -> bool {
        let filters_match = self
            .filters
            .iter()
            .all(|filter| fields.get(&filter.field) == Some(&filter.value));
        let has_order_field = self.order_by.as_ref().is_none_or(|order| {
            fields
                .get(&order.field)
                .is_some_and(|value| !value.is_null())
        });
        filters_match && has_order_field
    }

    /// Compares two documents according to the ordering.
    ///
    /// Returns [`Ordering::Equal`] when the query is unordered or the values
    /// are not comparable.
    #[must_use]
    pub fn compare(&self, left: &Map<String, Value>, right: &Map<String, Value>) -> Ordering {
        let Some(order) = self.order_by.as_ref() else {
            return Ordering::Equal;
        };
        let left_key = left.get(&order.field).and_then(SortKey::from_value);
        let right_key = right.get(&order.field).and_then(SortKey::from_value);
        let ordering = left_key.cmp(&right_key);
        match order.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Comparable projection of a field value.
///
/// Numbers are read as epoch milliseconds so they order consistently with
/// timestamp objects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Instant(i128),
    Text(String),
}

impl SortKey {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .map(|millis| Self::Instant(i128::from(millis) * 1_000_000)),
            Value::Object(_) => {
                Timestamp::from_value(value).map(|stamp| Self::Instant(stamp.to_nanos()))
            }
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}
