//! External views of birds and sightings.
//!
//! A view mirrors the persisted attributes of its entity and carries an
//! optional nested embedding of the other side of the relationship:
//! `None` means "not loaded", `Some(vec![])` means "loaded, empty".
//! Population of the nested side is the services' responsibility; the
//! conversion functions here only copy scalars, so no conversion ever
//! triggers a fetch.
//!
//! All fields take serde defaults: partially-absent JSON input is
//! normalized to default values rather than rejected.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  bird::{Bird, NewBird},
  sighting::{NewSighting, Sighting},
  timestamp,
};

// ─── BirdView ────────────────────────────────────────────────────────────────

/// External representation of a [`Bird`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdView {
  pub id:        Option<i64>,
  pub name:      String,
  pub color:     String,
  pub weight:    i32,
  pub height:    i32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sightings: Option<Vec<SightingView>>,
}

impl BirdView {
  /// Scalar copy from the persisted entity. `sightings` is left unloaded.
  pub fn from_entity(bird: &Bird) -> Self {
    Self {
      id:        Some(bird.id),
      name:      bird.name.clone(),
      color:     bird.color.clone(),
      weight:    bird.weight,
      height:    bird.height,
      sightings: None,
    }
  }

  /// Scalar copy into insert input. Any incoming identifier is discarded;
  /// the store assigns identifiers.
  pub fn to_new_bird(&self) -> NewBird {
    NewBird {
      name:   self.name.clone(),
      color:  self.color.clone(),
      weight: self.weight,
      height: self.height,
    }
  }
}

// ─── SightingView ────────────────────────────────────────────────────────────

/// External representation of a [`Sighting`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightingView {
  pub id:       Option<i64>,
  pub location: String,
  #[serde(with = "timestamp::serde_minute")]
  pub seen_at:  NaiveDateTime,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bird:     Option<Box<BirdView>>,
}

impl SightingView {
  /// Scalar copy from the persisted entity. `bird` is left unloaded.
  pub fn from_entity(sighting: &Sighting) -> Self {
    Self {
      id:       Some(sighting.id),
      location: sighting.location.clone(),
      seen_at:  sighting.seen_at,
      bird:     None,
    }
  }

  /// Scalar copy into insert input, truncated to minute precision. Any
  /// incoming identifier or embedded bird is discarded.
  pub fn to_new_sighting(&self) -> NewSighting {
    NewSighting {
      location: self.location.clone(),
      seen_at:  timestamp::truncate_to_minute(self.seen_at),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn robin() -> Bird {
    Bird {
      id:     7,
      name:   "Robin".into(),
      color:  "Red".into(),
      weight: 20,
      height: 14,
    }
  }

  #[test]
  fn bird_view_copies_scalars_and_leaves_sightings_unloaded() {
    let view = BirdView::from_entity(&robin());
    assert_eq!(view.id, Some(7));
    assert_eq!(view.name, "Robin");
    assert_eq!(view.color, "Red");
    assert_eq!(view.weight, 20);
    assert_eq!(view.height, 14);
    assert!(view.sightings.is_none());
  }

  #[test]
  fn to_new_bird_discards_identifier() {
    let view = BirdView::from_entity(&robin());
    let new = view.to_new_bird();
    assert_eq!(new.name, "Robin");
    assert_eq!(new.weight, 20);
  }

  #[test]
  fn sighting_view_round_trip() {
    let sighting = Sighting {
      id:       3,
      bird_id:  7,
      location: "Central Park".into(),
      seen_at:  NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap(),
    };
    let view = SightingView::from_entity(&sighting);
    assert_eq!(view.id, Some(3));
    assert_eq!(view.location, "Central Park");
    assert!(view.bird.is_none());

    let new = view.to_new_sighting();
    assert_eq!(new.location, "Central Park");
    assert_eq!(new.seen_at, sighting.seen_at);
  }

  #[test]
  fn partially_absent_input_is_normalized() {
    // Missing fields deserialize to defaults instead of failing.
    let view: BirdView = serde_json::from_str(r#"{"name":"Wren"}"#).unwrap();
    assert_eq!(view.name, "Wren");
    assert_eq!(view.color, "");
    assert_eq!(view.weight, 0);
    assert!(view.id.is_none());
    assert!(view.sightings.is_none());
  }

  #[test]
  fn unloaded_embeddings_are_omitted_from_json() {
    let json = serde_json::to_string(&BirdView::from_entity(&robin())).unwrap();
    assert!(!json.contains("sightings"));

    let view: SightingView =
      serde_json::from_str(r#"{"location":"Hyde Park","seen_at":"2024-05-01T08:00"}"#)
        .unwrap();
    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("bird"));
    assert!(json.contains("2024-05-01T08:00"));
  }
}
