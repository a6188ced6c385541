//! Handlers for sighting endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/birds/:id/sightings` | 404 if the bird is absent |
//! | `POST`   | `/birds/:id/sightings` | Body: [`SightingView`]; returns 201 |
//! | `GET`    | `/sightings` | Owning bird embedded per sighting |
//! | `GET`    | `/sightings/:id` | 404 if absent |
//! | `PUT`    | `/sightings/:id` | Location/timestamp only; 404 if absent |
//! | `DELETE` | `/sightings/:id` | 204 |
//! | `GET`    | `/sightings/location?location=` | Exact match, may be empty |
//! | `GET`    | `/sightings/seen-at?at=` | Exact minute match, may be empty |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDateTime;
use serde::Deserialize;

use aviary_core::{
  service::SightingService, store::BirdStore, timestamp, view::SightingView,
};

use crate::error::ApiError;

// ─── Per-bird ─────────────────────────────────────────────────────────────────

/// `GET /birds/:id/sightings`
pub async fn list_for_bird<S: BirdStore>(
  State(store): State<Arc<S>>,
  Path(bird_id): Path<i64>,
) -> Result<Json<Vec<SightingView>>, ApiError> {
  let sightings = SightingService::new(store)
    .find_all_by_bird(bird_id)
    .await?;
  Ok(Json(sightings))
}

/// `POST /birds/:id/sightings` — body: a [`SightingView`].
pub async fn create<S: BirdStore>(
  State(store): State<Arc<S>>,
  Path(bird_id): Path<i64>,
  Json(body): Json<SightingView>,
) -> Result<impl IntoResponse, ApiError> {
  tracing::info!(bird_id, location = %body.location, "create sighting");
  let saved = SightingService::new(store).create(bird_id, &body).await?;
  Ok((StatusCode::CREATED, Json(saved)))
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// `GET /sightings`
pub async fn list<S: BirdStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SightingView>>, ApiError> {
  let sightings = SightingService::new(store).find_all().await?;
  Ok(Json(sightings))
}

#[derive(Debug, Deserialize)]
pub struct LocationParams {
  pub location: String,
}

/// `GET /sightings/location?location=<location>`
pub async fn find_by_location<S: BirdStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<LocationParams>,
) -> Result<Json<Vec<SightingView>>, ApiError> {
  let sightings = SightingService::new(store)
    .find_by_location(&params.location)
    .await?;
  Ok(Json(sightings))
}

#[derive(Debug, Deserialize)]
pub struct SeenAtParams {
  #[serde(with = "timestamp::serde_minute")]
  pub at: NaiveDateTime,
}

/// `GET /sightings/seen-at?at=<%Y-%m-%dT%H:%M>`
pub async fn find_by_seen_at<S: BirdStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<SeenAtParams>,
) -> Result<Json<Vec<SightingView>>, ApiError> {
  let sightings = SightingService::new(store).find_by_seen_at(params.at).await?;
  Ok(Json(sightings))
}

// ─── Single record ────────────────────────────────────────────────────────────

/// `GET /sightings/:id`
pub async fn get_one<S: BirdStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<SightingView>, ApiError> {
  let sighting = SightingService::new(store).find_by_id(id).await?;
  Ok(Json(sighting))
}

/// `PUT /sightings/:id`
pub async fn update<S: BirdStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<SightingView>,
) -> Result<Json<SightingView>, ApiError> {
  tracing::info!(id, "update sighting");
  let updated = SightingService::new(store).update(id, &body).await?;
  Ok(Json(updated))
}

/// `DELETE /sightings/:id` — 204 on success.
pub async fn delete<S: BirdStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  tracing::info!(id, "delete sighting");
  SightingService::new(store).delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
