//! Datetime helpers.
//!
//! Provides since-date parsing for the query facade plus custom Serde
//! serialization/deserialization support:
//! - Serialization: `DateTime<Utc>` -> RFC3339 string
//! - Deserialization: RFC3339 string -> `DateTime<Utc>`

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{CoreError, CoreResult};

/// Parses a since-date argument as an ISO-8601 date or date-time.
///
/// Accepted forms, tried in order:
/// - RFC3339 with offset (`2025-10-01T14:30:00+02:00`)
/// - Naive date-time, interpreted as UTC (`2025-10-01T14:30:00`)
/// - Bare date, interpreted as UTC midnight (`2025-10-01`)
pub fn parse_since_date(input: &str) -> CoreResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        // Midnight is the natural lower bound for a bare date.
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(CoreError::InvalidDate(input.to_string()))
}

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Deserializes `DateTime<Utc>` from an RFC3339 string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}")))
}
