//! [`SqliteStore`] — the SQLite implementation of [`BirdStore`].

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::OptionalExtension as _;

use aviary_core::{
  bird::{Bird, NewBird},
  sighting::{NewSighting, Sighting},
  store::BirdStore,
  timestamp,
};

use crate::{
  Error, Result,
  encode::{RawSighting, encode_seen_at},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Aviary store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn exists_in(&self, sql: &'static str, id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(sql, rusqlite::params![id], |_| Ok(true))
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

/// Map a `sighting_id, bird_id, location, seen_at` row.
fn raw_sighting_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSighting> {
  Ok(RawSighting {
    sighting_id: row.get(0)?,
    bird_id:     row.get(1)?,
    location:    row.get(2)?,
    seen_at:     row.get(3)?,
  })
}

/// Map a `bird_id, name, color, weight, height` row.
fn bird_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Bird> {
  Ok(Bird {
    id:     row.get(0)?,
    name:   row.get(1)?,
    color:  row.get(2)?,
    weight: row.get(3)?,
    height: row.get(4)?,
  })
}

/// Bulk-insert sightings back-linked to `bird_id` inside an open
/// transaction; returns the assigned rowids in input order.
fn insert_sighting_rows(
  tx: &rusqlite::Transaction<'_>,
  bird_id: i64,
  rows: &[(String, String)],
) -> rusqlite::Result<Vec<i64>> {
  let mut ids = Vec::with_capacity(rows.len());
  let mut stmt = tx.prepare(
    "INSERT INTO sightings (bird_id, location, seen_at) VALUES (?1, ?2, ?3)",
  )?;
  for (location, seen_at) in rows {
    stmt.execute(rusqlite::params![bird_id, location, seen_at])?;
    ids.push(tx.last_insert_rowid());
  }
  Ok(ids)
}

fn encode_new_sightings(sightings: &[NewSighting]) -> Vec<(String, String)> {
  sightings
    .iter()
    .map(|s| (s.location.clone(), encode_seen_at(s.seen_at)))
    .collect()
}

/// Rebuild persisted [`Sighting`]s from insert inputs and their assigned
/// rowids.
fn persisted_sightings(
  ids: Vec<i64>,
  bird_id: i64,
  inputs: Vec<NewSighting>,
) -> Vec<Sighting> {
  ids
    .into_iter()
    .zip(inputs)
    .map(|(id, s)| Sighting {
      id,
      bird_id,
      location: s.location,
      seen_at: timestamp::truncate_to_minute(s.seen_at),
    })
    .collect()
}

// ─── BirdStore impl ──────────────────────────────────────────────────────────

impl BirdStore for SqliteStore {
  type Error = Error;

  // ── Birds ─────────────────────────────────────────────────────────────────

  async fn insert_bird(
    &self,
    bird: NewBird,
    sightings: Vec<NewSighting>,
  ) -> Result<(Bird, Vec<Sighting>)> {
    let name = bird.name.clone();
    let color = bird.color.clone();
    let (weight, height) = (bird.weight, bird.height);
    let encoded = encode_new_sightings(&sightings);

    let (bird_id, sighting_ids): (i64, Vec<i64>) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO birds (name, color, weight, height) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![name, color, weight, height],
        )?;
        let bird_id = tx.last_insert_rowid();
        let ids = insert_sighting_rows(&tx, bird_id, &encoded)?;
        tx.commit()?;
        Ok((bird_id, ids))
      })
      .await?;

    let persisted = Bird {
      id:     bird_id,
      name:   bird.name,
      color:  bird.color,
      weight: bird.weight,
      height: bird.height,
    };
    Ok((persisted, persisted_sightings(sighting_ids, bird_id, sightings)))
  }

  async fn update_bird(
    &self,
    bird: &Bird,
    sightings: Vec<NewSighting>,
  ) -> Result<Vec<Sighting>> {
    let id = bird.id;
    let name = bird.name.clone();
    let color = bird.color.clone();
    let (weight, height) = (bird.weight, bird.height);
    let encoded = encode_new_sightings(&sightings);

    let sighting_ids: Vec<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "UPDATE birds SET name = ?1, color = ?2, weight = ?3, height = ?4
           WHERE bird_id = ?5",
          rusqlite::params![name, color, weight, height, id],
        )?;
        let ids = insert_sighting_rows(&tx, id, &encoded)?;
        tx.commit()?;
        Ok(ids)
      })
      .await?;

    Ok(persisted_sightings(sighting_ids, id, sightings))
  }

  async fn get_bird(&self, id: i64) -> Result<Option<Bird>> {
    let bird = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT bird_id, name, color, weight, height FROM birds
               WHERE bird_id = ?1",
              rusqlite::params![id],
              bird_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(bird)
  }

  async fn list_birds(&self) -> Result<Vec<Bird>> {
    let birds = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT bird_id, name, color, weight, height FROM birds
           ORDER BY bird_id",
        )?;
        let rows = stmt
          .query_map([], bird_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(birds)
  }

  async fn find_bird_by_name(&self, name: &str) -> Result<Option<Bird>> {
    let name = name.to_owned();
    let bird = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT bird_id, name, color, weight, height FROM birds
               WHERE name = ?1 ORDER BY bird_id LIMIT 1",
              rusqlite::params![name],
              bird_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(bird)
  }

  async fn find_bird_by_color(&self, color: &str) -> Result<Option<Bird>> {
    let color = color.to_owned();
    let bird = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT bird_id, name, color, weight, height FROM birds
               WHERE color = ?1 ORDER BY bird_id LIMIT 1",
              rusqlite::params![color],
              bird_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(bird)
  }

  async fn bird_exists(&self, id: i64) -> Result<bool> {
    self
      .exists_in("SELECT 1 FROM birds WHERE bird_id = ?1", id)
      .await
  }

  async fn delete_bird(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM sightings WHERE bird_id = ?1",
          rusqlite::params![id],
        )?;
        tx.execute("DELETE FROM birds WHERE bird_id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Sightings ─────────────────────────────────────────────────────────────

  async fn insert_sighting(
    &self,
    bird_id: i64,
    sighting: NewSighting,
  ) -> Result<Sighting> {
    let location = sighting.location.clone();
    let seen_at_str = encode_seen_at(sighting.seen_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sightings (bird_id, location, seen_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![bird_id, location, seen_at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Sighting {
      id,
      bird_id,
      location: sighting.location,
      seen_at: timestamp::truncate_to_minute(sighting.seen_at),
    })
  }

  async fn update_sighting(&self, sighting: &Sighting) -> Result<()> {
    let id = sighting.id;
    let location = sighting.location.clone();
    let seen_at_str = encode_seen_at(sighting.seen_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE sightings SET location = ?1, seen_at = ?2 WHERE sighting_id = ?3",
          rusqlite::params![location, seen_at_str, id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_sighting(&self, id: i64) -> Result<Option<Sighting>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT sighting_id, bird_id, location, seen_at FROM sightings
               WHERE sighting_id = ?1",
              rusqlite::params![id],
              raw_sighting_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawSighting::into_sighting).transpose()
  }

  async fn list_sightings(&self) -> Result<Vec<Sighting>> {
    let raws = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT sighting_id, bird_id, location, seen_at FROM sightings
           ORDER BY sighting_id",
        )?;
        let rows = stmt
          .query_map([], raw_sighting_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawSighting::into_sighting).collect()
  }

  async fn sightings_for_bird(&self, bird_id: i64) -> Result<Vec<Sighting>> {
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT sighting_id, bird_id, location, seen_at FROM sightings
           WHERE bird_id = ?1 ORDER BY sighting_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![bird_id], raw_sighting_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawSighting::into_sighting).collect()
  }

  async fn sightings_at_location(&self, location: &str) -> Result<Vec<Sighting>> {
    let location = location.to_owned();
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT sighting_id, bird_id, location, seen_at FROM sightings
           WHERE location = ?1 ORDER BY sighting_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![location], raw_sighting_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawSighting::into_sighting).collect()
  }

  async fn sightings_at(&self, at: NaiveDateTime) -> Result<Vec<Sighting>> {
    let seen_at_str = encode_seen_at(at);
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT sighting_id, bird_id, location, seen_at FROM sightings
           WHERE seen_at = ?1 ORDER BY sighting_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![seen_at_str], raw_sighting_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawSighting::into_sighting).collect()
  }

  async fn sighting_exists(&self, id: i64) -> Result<bool> {
    self
      .exists_in("SELECT 1 FROM sightings WHERE sighting_id = ?1", id)
      .await
  }

  async fn delete_sighting(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM sightings WHERE sighting_id = ?1",
          rusqlite::params![id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
