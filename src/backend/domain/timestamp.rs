//! Backend timestamp encoding and millisecond normalisation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp object as stored by the backend for server-stamped fields.
///
/// Serialised as `{"seconds": <i64>, "nanoseconds": <u32>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds, `0..1_000_000_000`.
    pub nanoseconds: u32,
}

impl Timestamp {
    /// Captures a `chrono` instant.
    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            seconds: instant.timestamp(),
            nanoseconds: instant.timestamp_subsec_nanos(),
        }
    }

    /// Converts back to a `chrono` instant, if in range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }

    /// Returns the instant as milliseconds since the Unix epoch.
    #[must_use]
    pub fn to_millis(self) -> Option<i64> {
        self.to_datetime().map(|instant| instant.timestamp_millis())
    }

    /// Returns the instant as nanoseconds since the Unix epoch.
    #[must_use]
    pub fn to_nanos(self) -> i128 {
        i128::from(self.seconds) * 1_000_000_000 + i128::from(self.nanoseconds)
    }

    /// Decodes a timestamp object from a JSON value.
    ///
    /// Returns `None` for anything that is not a timestamp object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let seconds = object.get("seconds")?.as_i64()?;
        let nanoseconds = object
            .get("nanoseconds")
            .and_then(Value::as_u64)
            .and_then(|nanos| u32::try_from(nanos).ok())
            .unwrap_or_default();
        Some(Self {
            seconds,
            nanoseconds,
        })
    }

    /// Encodes the timestamp as a JSON object.
    #[must_use]
    pub fn to_value(self) -> Value {
        serde_json::json!({
            "seconds": self.seconds,
            "nanoseconds": self.nanoseconds,
        })
    }
}

/// Normalises a stored time value to epoch milliseconds.
///
/// Accepts either a raw whole millisecond number, integral or a float with
/// no fractional part, or a backend [`Timestamp`] object. Anything else
/// yields `None`.
#[must_use]
pub fn normalize_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().and_then(|raw| i64::try_from(raw).ok()))
            .or_else(|| number.as_f64().and_then(whole_millis)),
        Value::Object(_) => Timestamp::from_value(value).and_then(Timestamp::to_millis),
        _ => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is whole and range-checked before the cast"
)]
fn whole_millis(raw: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    (raw.is_finite() && raw.fract().abs() < f64::EPSILON && raw.abs() <= LIMIT)
        .then(|| raw as i64)
}
