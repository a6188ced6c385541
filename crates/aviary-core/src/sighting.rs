//! Sighting — a timestamped, located observation of a bird.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::timestamp;

/// A persisted sighting.
///
/// `bird_id` is a mandatory back-reference to the owning
/// [`Bird`](crate::bird::Bird); the sighting does not control the bird's
/// lifetime. The owning bird must exist at the moment a sighting is
/// created, and the reference is never reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
  pub id:       i64,
  pub bird_id:  i64,
  pub location: String,
  /// Observation timestamp, minute precision.
  #[serde(with = "timestamp::serde_minute")]
  pub seen_at:  NaiveDateTime,
}

/// Insert input for a sighting. The owning bird is supplied separately by
/// the store operation that persists it.
#[derive(Debug, Clone)]
pub struct NewSighting {
  pub location: String,
  pub seen_at:  NaiveDateTime,
}
