//! Lenient timestamps for record date fields.
//!
//! Input accepts ISO-8601 text or milliseconds since the Unix epoch. Text
//! that cannot be parsed is kept as [`Timestamp::Invalid`] instead of failing
//! the whole record; an invalid timestamp serializes as `null`, has no Unix
//! seconds, and ranks as the oldest possible time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A point in time parsed from a record's JSON input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// A well-formed instant.
    Valid(DateTime<Utc>),
    /// The raw input that could not be interpreted as a date.
    Invalid(String),
}

impl Timestamp {
    /// Build a timestamp from a JSON field value.
    ///
    /// Returns `None` for values that count as absent: `null`, `false`, the
    /// empty string, and `0`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::parse(s)),
            Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().and_then(truncate_millis));
                match millis {
                    Some(0) => None,
                    Some(ms) => Some(
                        DateTime::from_timestamp_millis(ms)
                            .map_or_else(|| Self::Invalid(n.to_string()), Self::Valid),
                    ),
                    None => Some(Self::Invalid(n.to_string())),
                }
            }
            other => Some(Self::Invalid(other.to_string())),
        }
    }

    /// Parse ISO-8601 text.
    ///
    /// Accepts full RFC 3339 (`2023-01-01T00:00:00.000Z`), a date-time with
    /// no offset (read as UTC), and a bare date (midnight UTC).
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::Valid(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Self::Valid(naive.and_utc());
        }
        if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Self::Valid(midnight.and_utc());
        }
        tracing::debug!(input = text, "unparseable timestamp kept as invalid");
        Self::Invalid(text.to_owned())
    }

    /// The instant, if the input was well formed.
    #[must_use]
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(dt) => Some(*dt),
            Self::Invalid(_) => None,
        }
    }

    /// Canonical ISO-8601 text with millisecond precision and a `Z` suffix.
    #[must_use]
    pub fn to_iso_string(&self) -> Option<String> {
        self.instant()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Whole seconds since the Unix epoch, rounded toward negative infinity.
    #[must_use]
    pub fn unix_seconds(&self) -> Option<i64> {
        self.instant().map(|dt| dt.timestamp())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Valid(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_iso_string() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_millis(value: f64) -> Option<i64> {
    // 8.64e15 ms is the widest range a JSON date can express.
    (value.is_finite() && value.abs() <= 8.64e15).then(|| value.trunc() as i64)
}
