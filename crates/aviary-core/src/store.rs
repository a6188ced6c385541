//! The `BirdStore` trait — the persistence gateway abstraction.
//!
//! The trait is implemented by storage backends (e.g.
//! `aviary-store-sqlite`). The services depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use chrono::NaiveDateTime;

use crate::{
  bird::{Bird, NewBird},
  sighting::{NewSighting, Sighting},
};

/// Abstraction over an Aviary storage backend.
///
/// Single-result lookups that find nothing return `None`, never an error;
/// multi-result lookups that find nothing return an empty `Vec`. Operations
/// that touch a bird together with its sightings (insert, update, delete)
/// are atomic: either every row is written or none is.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait BirdStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Birds ─────────────────────────────────────────────────────────────

  /// Persist a new bird, bulk-inserting `sightings` back-linked to the
  /// fresh bird identifier in the same transaction.
  fn insert_bird(
    &self,
    bird: NewBird,
    sightings: Vec<NewSighting>,
  ) -> impl Future<Output = Result<(Bird, Vec<Sighting>), Self::Error>> + Send + '_;

  /// Replace-by-identifier on the bird row and bulk-insert the newly
  /// supplied sightings, in one transaction. Previously stored sightings
  /// are left untouched.
  fn update_bird<'a>(
    &'a self,
    bird: &'a Bird,
    sightings: Vec<NewSighting>,
  ) -> impl Future<Output = Result<Vec<Sighting>, Self::Error>> + Send + 'a;

  /// Retrieve a bird by identifier. Returns `None` if not found.
  fn get_bird(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Bird>, Self::Error>> + Send + '_;

  /// List all birds in the store's enumeration order.
  fn list_birds(
    &self,
  ) -> impl Future<Output = Result<Vec<Bird>, Self::Error>> + Send + '_;

  /// Single-result exact-match lookup by name.
  fn find_bird_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Bird>, Self::Error>> + Send + 'a;

  /// Single-result exact-match lookup by color.
  fn find_bird_by_color<'a>(
    &'a self,
    color: &'a str,
  ) -> impl Future<Output = Result<Option<Bird>, Self::Error>> + Send + 'a;

  fn bird_exists(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a bird and all of its sightings in one transaction. The
  /// cascade is issued here explicitly, not delegated to schema-level
  /// `ON DELETE` behaviour.
  fn delete_bird(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Sightings ─────────────────────────────────────────────────────────

  /// Persist a new sighting under `bird_id`. The caller is responsible for
  /// having checked that the bird exists.
  fn insert_sighting(
    &self,
    bird_id: i64,
    sighting: NewSighting,
  ) -> impl Future<Output = Result<Sighting, Self::Error>> + Send + '_;

  /// Replace-by-identifier. `bird_id` is written through unchanged; the
  /// owning bird is never reassigned by an update.
  fn update_sighting<'a>(
    &'a self,
    sighting: &'a Sighting,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Retrieve a sighting by identifier. Returns `None` if not found.
  fn get_sighting(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Sighting>, Self::Error>> + Send + '_;

  /// List all sightings in the store's enumeration order.
  fn list_sightings(
    &self,
  ) -> impl Future<Output = Result<Vec<Sighting>, Self::Error>> + Send + '_;

  /// All sightings back-linked to `bird_id`, in enumeration order.
  fn sightings_for_bird(
    &self,
    bird_id: i64,
  ) -> impl Future<Output = Result<Vec<Sighting>, Self::Error>> + Send + '_;

  /// Multi-result exact-match lookup by location.
  fn sightings_at_location<'a>(
    &'a self,
    location: &'a str,
  ) -> impl Future<Output = Result<Vec<Sighting>, Self::Error>> + Send + 'a;

  /// Multi-result exact-match lookup by observation timestamp (minute
  /// precision).
  fn sightings_at(
    &self,
    at: NaiveDateTime,
  ) -> impl Future<Output = Result<Vec<Sighting>, Self::Error>> + Send + '_;

  fn sighting_exists(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_sighting(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
