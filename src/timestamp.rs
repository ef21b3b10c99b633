//! Millisecond timestamps, the unit HubSpot uses for every date parameter.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{HubSpotError, Result};

/// Epoch values with 13 or more digits are already in milliseconds.
const MILLIS_THRESHOLD: u64 = 1_000_000_000_000;

/// A point in time, in any of the forms accepted by [`ms_timestamp`].
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    DateTime(DateTime<Utc>),
    /// Unix time, in seconds or milliseconds.
    Epoch(i64),
    /// RFC 3339, e.g. `2024-05-01T12:00:00Z`.
    Text(String),
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(time: DateTime<Tz>) -> Self {
        Timestamp::DateTime(time.with_timezone(&Utc))
    }
}

impl From<i64> for Timestamp {
    fn from(epoch: i64) -> Self {
        Timestamp::Epoch(epoch)
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(text: String) -> Self {
        Timestamp::Text(text)
    }
}

/// Convert a time to epoch milliseconds.
///
/// Integers below 13 digits are read as seconds.
pub fn ms_timestamp(time: impl Into<Timestamp>) -> Result<i64> {
    match time.into() {
        Timestamp::DateTime(dt) => Ok(dt.timestamp_millis()),
        Timestamp::Epoch(n) if n.unsigned_abs() < MILLIS_THRESHOLD => Ok(n * 1000),
        Timestamp::Epoch(n) => Ok(n),
        Timestamp::Text(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.timestamp_millis())
            .map_err(|e| HubSpotError::Config {
                message: format!("Invalid timestamp '{s}': {e}"),
            }),
    }
}
