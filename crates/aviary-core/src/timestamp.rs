//! Minute-precision observation timestamps.
//!
//! Sightings are recorded to the minute. One canonical text form,
//! `%Y-%m-%dT%H:%M`, is used both in JSON and in database columns, so
//! exact-match timestamp queries compare canonical strings.

use chrono::{NaiveDateTime, Timelike};

/// Canonical text form of an observation timestamp.
pub const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format a timestamp in the canonical minute form. Sub-minute components
/// are dropped.
pub fn format_minute(at: NaiveDateTime) -> String {
  at.format(MINUTE_FORMAT).to_string()
}

/// Parse the canonical minute form.
pub fn parse_minute(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
  NaiveDateTime::parse_from_str(s, MINUTE_FORMAT)
}

/// Truncate a timestamp to whole minutes.
pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
  at.with_second(0)
    .and_then(|t| t.with_nanosecond(0))
    .unwrap_or(at)
}

/// Serde adapter for `NaiveDateTime` fields in the canonical minute form.
pub mod serde_minute {
  use chrono::NaiveDateTime;
  use serde::{Deserialize, Deserializer, Serializer, de};

  use super::{format_minute, parse_minute};

  pub fn serialize<S>(
    at: &NaiveDateTime,
    serializer: S,
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&format_minute(*at))
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    parse_minute(&s).map_err(de::Error::custom)
  }
}
