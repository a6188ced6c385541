//! Handlers for `/birds` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/birds` | Fully hydrated list |
//! | `POST`   | `/birds` | Body: [`BirdView`]; returns 201 |
//! | `GET`    | `/birds/name?name=` | 404 if no exact match |
//! | `GET`    | `/birds/color?color=` | 404 if no exact match |
//! | `PUT`    | `/birds/:id` | Full field replacement; 404 if absent |
//! | `DELETE` | `/birds/:id` | 204; cascades to sightings |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use aviary_core::{service::BirdService, store::BirdStore, view::BirdView};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /birds`
pub async fn list<S: BirdStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<BirdView>>, ApiError> {
  let birds = BirdService::new(store).get_all().await?;
  Ok(Json(birds))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /birds` — body: a [`BirdView`], optionally with nested sightings.
pub async fn create<S: BirdStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<BirdView>,
) -> Result<impl IntoResponse, ApiError> {
  tracing::info!(name = %body.name, "create bird");
  let saved = BirdService::new(store).save(&body).await?;
  Ok((StatusCode::CREATED, Json(saved)))
}

// ─── Find by name / color ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NameParams {
  pub name: String,
}

/// `GET /birds/name?name=<name>`
pub async fn find_by_name<S: BirdStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<NameParams>,
) -> Result<Json<BirdView>, ApiError> {
  let bird = BirdService::new(store).find_by_name(&params.name).await?;
  Ok(Json(bird))
}

#[derive(Debug, Deserialize)]
pub struct ColorParams {
  pub color: String,
}

/// `GET /birds/color?color=<color>`
pub async fn find_by_color<S: BirdStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ColorParams>,
) -> Result<Json<BirdView>, ApiError> {
  let bird = BirdService::new(store).find_by_color(&params.color).await?;
  Ok(Json(bird))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /birds/:id`
pub async fn update<S: BirdStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<BirdView>,
) -> Result<Json<BirdView>, ApiError> {
  tracing::info!(id, "update bird");
  let updated = BirdService::new(store).update(id, &body).await?;
  Ok(Json(updated))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /birds/:id` — 204 on success, cascading to the bird's sightings.
pub async fn delete<S: BirdStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  tracing::info!(id, "delete bird");
  BirdService::new(store).delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
