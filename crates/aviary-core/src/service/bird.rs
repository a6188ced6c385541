//! Business logic for the bird lifecycle.

use std::sync::Arc;

use crate::{
  bird::Bird,
  error::{Error, Result},
  sighting::NewSighting,
  store::BirdStore,
  view::{BirdView, SightingView},
};

/// Orchestrates persistence and view conversion for birds.
pub struct BirdService<S> {
  store: Arc<S>,
}

impl<S> Clone for BirdService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: BirdStore> BirdService<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  /// Persist a new bird, together with any sightings supplied on the view.
  /// Bird and sightings become visible atomically or not at all.
  ///
  /// The returned view carries the persisted sightings iff the input
  /// carried a list; a bird saved alone comes back with `sightings: None`.
  pub async fn save(&self, view: &BirdView) -> Result<BirdView> {
    let supplied = view.sightings.as_deref();
    let new_sightings = Self::to_new_sightings(supplied);

    let (bird, sightings) = self
      .store
      .insert_bird(view.to_new_bird(), new_sightings)
      .await
      .map_err(Error::store)?;

    let mut saved = BirdView::from_entity(&bird);
    if supplied.is_some() {
      saved.sightings =
        Some(sightings.iter().map(SightingView::from_entity).collect());
    }
    Ok(saved)
  }

  /// Full field replacement of name/color/weight/height; the identifier is
  /// never altered. Sightings supplied on the view are persisted and
  /// back-linked to this bird; sightings omitted from the view are left in
  /// the store untouched.
  pub async fn update(&self, id: i64, view: &BirdView) -> Result<BirdView> {
    let existing = self
      .store
      .get_bird(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::BirdNotFound(id))?;

    let bird = Bird {
      id:     existing.id,
      name:   view.name.clone(),
      color:  view.color.clone(),
      weight: view.weight,
      height: view.height,
    };

    let supplied = view.sightings.as_deref();
    let sightings = self
      .store
      .update_bird(&bird, Self::to_new_sightings(supplied))
      .await
      .map_err(Error::store)?;

    let mut updated = BirdView::from_entity(&bird);
    if supplied.is_some() {
      updated.sightings =
        Some(sightings.iter().map(SightingView::from_entity).collect());
    }
    Ok(updated)
  }

  /// Fully hydrated views of every bird, in the store's enumeration order.
  ///
  /// Sightings are fetched from the gateway per bird rather than trusted
  /// from any association loaded alongside the bird row, so `sightings` is
  /// always `Some` here, possibly empty.
  pub async fn get_all(&self) -> Result<Vec<BirdView>> {
    let birds = self.store.list_birds().await.map_err(Error::store)?;

    let mut views = Vec::with_capacity(birds.len());
    for bird in &birds {
      let sightings = self
        .store
        .sightings_for_bird(bird.id)
        .await
        .map_err(Error::store)?;
      let mut view = BirdView::from_entity(bird);
      view.sightings =
        Some(sightings.iter().map(SightingView::from_entity).collect());
      views.push(view);
    }
    Ok(views)
  }

  /// Single-result exact lookup by name.
  pub async fn find_by_name(&self, name: &str) -> Result<BirdView> {
    let bird = self
      .store
      .find_bird_by_name(name)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::BirdNameNotFound(name.to_owned()))?;
    Ok(BirdView::from_entity(&bird))
  }

  /// Single-result exact lookup by color.
  pub async fn find_by_color(&self, color: &str) -> Result<BirdView> {
    let bird = self
      .store
      .find_bird_by_color(color)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::BirdColorNotFound(color.to_owned()))?;
    Ok(BirdView::from_entity(&bird))
  }

  /// Delete a bird. The cascade to its sightings is the store's
  /// transactional guarantee, not re-implemented here.
  pub async fn delete(&self, id: i64) -> Result<()> {
    if !self.store.bird_exists(id).await.map_err(Error::store)? {
      return Err(Error::BirdNotFound(id));
    }
    self.store.delete_bird(id).await.map_err(Error::store)
  }

  fn to_new_sightings(supplied: Option<&[SightingView]>) -> Vec<NewSighting> {
    supplied
      .map(|list| list.iter().map(SightingView::to_new_sighting).collect())
      .unwrap_or_default()
  }
}
