//! Bird — the species record that sightings attach to.

use serde::{Deserialize, Serialize};

/// A persisted bird.
///
/// The identifier is assigned by the store on insert and never changes
/// afterwards. Ownership of sightings is a foreign key on the sighting
/// side, not an in-memory back-pointer graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bird {
  pub id:     i64,
  pub name:   String,
  pub color:  String,
  pub weight: i32,
  pub height: i32,
}

/// Insert input for a bird. The store assigns the identifier.
#[derive(Debug, Clone, Default)]
pub struct NewBird {
  pub name:   String,
  pub color:  String,
  pub weight: i32,
  pub height: i32,
}
