//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Identifiers are SQLite rowids and map straight to `i64`; the only
//! column that needs a codec is the observation timestamp, stored in the
//! canonical minute form so exact-match queries compare strings.

use aviary_core::{sighting::Sighting, timestamp};
use chrono::NaiveDateTime;

use crate::{Error, Result};

// ─── seen_at ─────────────────────────────────────────────────────────────────

pub fn encode_seen_at(at: NaiveDateTime) -> String {
  timestamp::format_minute(at)
}

pub fn decode_seen_at(s: &str) -> Result<NaiveDateTime> {
  timestamp::parse_minute(s)
    .map_err(|e| Error::TimestampParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `sightings` row; `seen_at` is decoded
/// outside the connection closure.
pub struct RawSighting {
  pub sighting_id: i64,
  pub bird_id:     i64,
  pub location:    String,
  pub seen_at:     String,
}

impl RawSighting {
  pub fn into_sighting(self) -> Result<Sighting> {
    Ok(Sighting {
      id:       self.sighting_id,
      bird_id:  self.bird_id,
      location: self.location,
      seen_at:  decode_seen_at(&self.seen_at)?,
    })
  }
}
