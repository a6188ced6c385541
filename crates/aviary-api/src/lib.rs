//! JSON REST API for Aviary.
//!
//! Exposes an axum [`Router`] backed by any
//! [`aviary_core::store::BirdStore`]. Transport concerns (TLS, the `/api`
//! prefix, request tracing) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", aviary_api::api_router(store.clone()))
//! ```

pub mod birds;
pub mod error;
pub mod sightings;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use aviary_core::store::BirdStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: BirdStore + 'static,
{
  Router::new()
    // Birds
    .route("/birds", get(birds::list::<S>).post(birds::create::<S>))
    .route("/birds/name", get(birds::find_by_name::<S>))
    .route("/birds/color", get(birds::find_by_color::<S>))
    .route(
      "/birds/{id}",
      put(birds::update::<S>).delete(birds::delete::<S>),
    )
    // Sightings
    .route(
      "/birds/{id}/sightings",
      get(sightings::list_for_bird::<S>).post(sightings::create::<S>),
    )
    .route("/sightings", get(sightings::list::<S>))
    .route("/sightings/location", get(sightings::find_by_location::<S>))
    .route("/sightings/seen-at", get(sightings::find_by_seen_at::<S>))
    .route(
      "/sightings/{id}",
      get(sightings::get_one::<S>)
        .put(sightings::update::<S>)
        .delete(sightings::delete::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use aviary_store_sqlite::SqliteStore;
  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::api_router;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
      Some(value) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn robin() -> Value {
    json!({ "name": "Robin", "color": "Red", "weight": 20, "height": 14 })
  }

  // ── Birds ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_bird_returns_201_with_assigned_id() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/birds", Some(robin())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "Robin");
    assert_eq!(body["color"], "Red");
    assert_eq!(body["weight"], 20);
    assert_eq!(body["height"], 14);
    // No sightings supplied, none echoed back.
    assert!(body.get("sightings").is_none());
  }

  #[tokio::test]
  async fn create_bird_with_nested_sightings() {
    let app = app().await;
    let payload = json!({
      "name": "Robin", "color": "Red", "weight": 20, "height": 14,
      "sightings": [
        { "location": "Central Park", "seen_at": "2024-05-01T08:00" },
        { "location": "Hyde Park",    "seen_at": "2024-05-02T09:30" },
      ]
    });
    let (status, body) = send(&app, "POST", "/birds", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    let sightings = body["sightings"].as_array().unwrap();
    assert_eq!(sightings.len(), 2);
    assert!(sightings.iter().all(|s| s["id"].as_i64().is_some()));
    assert_eq!(sightings[0]["seen_at"], "2024-05-01T08:00");
  }

  #[tokio::test]
  async fn list_birds_is_fully_hydrated() {
    let app = app().await;
    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();
    send(
      &app,
      "POST",
      &format!("/birds/{bird_id}/sightings"),
      Some(json!({ "location": "Central Park", "seen_at": "2024-05-01T08:00" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/birds", None).await;
    assert_eq!(status, StatusCode::OK);
    let birds = body.as_array().unwrap();
    assert_eq!(birds.len(), 1);
    assert_eq!(birds[0]["sightings"].as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn find_bird_by_name_and_color() {
    let app = app().await;
    send(&app, "POST", "/birds", Some(robin())).await;

    let (status, body) = send(&app, "GET", "/birds/name?name=Robin", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["color"], "Red");

    let (status, body) = send(&app, "GET", "/birds/color?color=Red", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Robin");

    let (status, body) = send(&app, "GET", "/birds/name?name=Dodo", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Dodo"));
  }

  #[tokio::test]
  async fn update_bird_replaces_fields() {
    let app = app().await;
    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/birds/{bird_id}"),
      Some(json!({ "name": "European Robin", "color": "Orange", "weight": 22, "height": 15 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64(), Some(bird_id));
    assert_eq!(body["name"], "European Robin");
    assert_eq!(body["color"], "Orange");
  }

  #[tokio::test]
  async fn update_missing_bird_returns_404() {
    let app = app().await;
    let (status, _) = send(&app, "PUT", "/birds/99", Some(robin())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_bird_returns_204_then_404() {
    let app = app().await;
    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/birds/{bird_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "DELETE", &format!("/birds/{bird_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Sightings ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_sighting_embeds_owning_bird() {
    let app = app().await;
    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();

    let (status, body) = send(
      &app,
      "POST",
      &format!("/birds/{bird_id}/sightings"),
      Some(json!({ "location": "Central Park", "seen_at": "2024-05-01T08:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["location"], "Central Park");
    assert_eq!(body["seen_at"], "2024-05-01T08:00");
    assert_eq!(body["bird"]["id"].as_i64(), Some(bird_id));
    assert_eq!(body["bird"]["color"], "Red");
  }

  #[tokio::test]
  async fn create_sighting_under_missing_bird_returns_404() {
    let app = app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/birds/1/sightings",
      Some(json!({ "location": "Central Park", "seen_at": "2024-05-01T08:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/sightings", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn get_update_delete_sighting() {
    let app = app().await;
    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();
    let (_, created) = send(
      &app,
      "POST",
      &format!("/birds/{bird_id}/sightings"),
      Some(json!({ "location": "Central Park", "seen_at": "2024-05-01T08:00" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/sightings/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Central Park");

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/sightings/{id}"),
      Some(json!({ "location": "Hyde Park", "seen_at": "2024-05-01T17:45" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Hyde Park");
    assert_eq!(body["seen_at"], "2024-05-01T17:45");

    let (status, _) = send(&app, "DELETE", &format!("/sightings/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/sightings/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn query_sightings_by_location_and_time() {
    let app = app().await;
    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();
    for (location, seen_at) in [
      ("Central Park", "2024-05-01T08:00"),
      ("Central Park", "2024-05-02T09:30"),
      ("Hyde Park", "2024-05-01T08:00"),
    ] {
      send(
        &app,
        "POST",
        &format!("/birds/{bird_id}/sightings"),
        Some(json!({ "location": location, "seen_at": seen_at })),
      )
      .await;
    }

    let (status, body) =
      send(&app, "GET", "/sightings/location?location=Central%20Park", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) =
      send(&app, "GET", "/sightings/seen-at?at=2024-05-01T08:00", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    // No match is an empty list, not an error.
    let (status, body) =
      send(&app, "GET", "/sightings/location?location=Green%20Park", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn list_all_sightings_embeds_birds() {
    let app = app().await;
    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();
    send(
      &app,
      "POST",
      &format!("/birds/{bird_id}/sightings"),
      Some(json!({ "location": "Central Park", "seen_at": "2024-05-01T08:00" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/sightings", None).await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["bird"]["name"], "Robin");
  }

  // ── End-to-end scenario ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn bird_lifecycle_over_http() {
    let app = app().await;

    let (_, bird) = send(&app, "POST", "/birds", Some(robin())).await;
    let bird_id = bird["id"].as_i64().unwrap();

    send(
      &app,
      "POST",
      &format!("/birds/{bird_id}/sightings"),
      Some(json!({ "location": "Central Park", "seen_at": "2024-05-01T08:00" })),
    )
    .await;

    let (status, body) =
      send(&app, "GET", &format!("/birds/{bird_id}/sightings"), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    // The per-bird listing leaves the bird embedding unloaded.
    assert!(listed[0].get("bird").is_none());

    let (status, _) = send(&app, "DELETE", &format!("/birds/{bird_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The bird is gone, so its sightings listing is a 404, not an empty list.
    let (status, _) =
      send(&app, "GET", &format!("/birds/{bird_id}/sightings"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
