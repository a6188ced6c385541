//! Business logic for the sighting lifecycle.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
  error::{Error, Result},
  sighting::Sighting,
  store::BirdStore,
  timestamp,
  view::{BirdView, SightingView},
};

/// Orchestrates persistence and view conversion for sightings.
///
/// Owns the invariant that a sighting always references an existing bird.
pub struct SightingService<S> {
  store: Arc<S>,
}

impl<S> Clone for SightingService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: BirdStore> SightingService<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  /// Persist a sighting under an existing bird.
  ///
  /// Fails with [`Error::BirdNotFound`] before anything is written if the
  /// bird is absent. The returned view embeds the owning bird.
  pub async fn create(&self, bird_id: i64, view: &SightingView) -> Result<SightingView> {
    let bird = self
      .store
      .get_bird(bird_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::BirdNotFound(bird_id))?;

    let sighting = self
      .store
      .insert_sighting(bird.id, view.to_new_sighting())
      .await
      .map_err(Error::store)?;

    let mut saved = SightingView::from_entity(&sighting);
    saved.bird = Some(Box::new(BirdView::from_entity(&bird)));
    Ok(saved)
  }

  /// Replace location and timestamp on an existing sighting. The owning
  /// bird reference is not reassignable through update.
  pub async fn update(&self, id: i64, view: &SightingView) -> Result<SightingView> {
    let existing = self
      .store
      .get_sighting(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::SightingNotFound(id))?;

    let sighting = Sighting {
      id:       existing.id,
      bird_id:  existing.bird_id,
      location: view.location.clone(),
      seen_at:  timestamp::truncate_to_minute(view.seen_at),
    };
    self
      .store
      .update_sighting(&sighting)
      .await
      .map_err(Error::store)?;

    Ok(SightingView::from_entity(&sighting))
  }

  pub async fn find_by_id(&self, id: i64) -> Result<SightingView> {
    let sighting = self
      .store
      .get_sighting(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::SightingNotFound(id))?;
    Ok(SightingView::from_entity(&sighting))
  }

  /// Exact-match lookup; an empty result is `Ok(vec![])`, never an error.
  pub async fn find_by_location(&self, location: &str) -> Result<Vec<SightingView>> {
    let sightings = self
      .store
      .sightings_at_location(location)
      .await
      .map_err(Error::store)?;
    Ok(sightings.iter().map(SightingView::from_entity).collect())
  }

  /// Exact-match lookup at minute precision; an empty result is
  /// `Ok(vec![])`, never an error.
  pub async fn find_by_seen_at(&self, at: NaiveDateTime) -> Result<Vec<SightingView>> {
    let sightings = self
      .store
      .sightings_at(timestamp::truncate_to_minute(at))
      .await
      .map_err(Error::store)?;
    Ok(sightings.iter().map(SightingView::from_entity).collect())
  }

  /// All sightings of one bird, `bird` embeddings left unloaded.
  ///
  /// Fails with [`Error::BirdNotFound`] if the bird does not exist — a
  /// deleted bird yields an error here, not an empty list.
  pub async fn find_all_by_bird(&self, bird_id: i64) -> Result<Vec<SightingView>> {
    if !self.store.bird_exists(bird_id).await.map_err(Error::store)? {
      return Err(Error::BirdNotFound(bird_id));
    }
    let sightings = self
      .store
      .sightings_for_bird(bird_id)
      .await
      .map_err(Error::store)?;
    Ok(sightings.iter().map(SightingView::from_entity).collect())
  }

  /// Every sighting with its owning bird's view embedded. The bird is
  /// looked up from the gateway per sighting, never trusted from a cache.
  pub async fn find_all(&self) -> Result<Vec<SightingView>> {
    let sightings = self.store.list_sightings().await.map_err(Error::store)?;

    let mut views = Vec::with_capacity(sightings.len());
    for sighting in &sightings {
      let bird = self
        .store
        .get_bird(sighting.bird_id)
        .await
        .map_err(Error::store)?
        .ok_or(Error::BirdNotFound(sighting.bird_id))?;
      let mut view = SightingView::from_entity(sighting);
      view.bird = Some(Box::new(BirdView::from_entity(&bird)));
      views.push(view);
    }
    Ok(views)
  }

  pub async fn delete(&self, id: i64) -> Result<()> {
    if !self.store.sighting_exists(id).await.map_err(Error::store)? {
      return Err(Error::SightingNotFound(id));
    }
    self.store.delete_sighting(id).await.map_err(Error::store)
  }
}
