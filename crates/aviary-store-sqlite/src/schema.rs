//! SQL schema for the Aviary SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS birds (
    bird_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    color   TEXT NOT NULL,
    weight  INTEGER NOT NULL,
    height  INTEGER NOT NULL
);

-- Sightings carry a mandatory back-reference to their owning bird.
-- Deleting a bird removes its sightings in the same transaction; the
-- cascade is issued by the store, not by schema-level ON DELETE.
CREATE TABLE IF NOT EXISTS sightings (
    sighting_id INTEGER PRIMARY KEY AUTOINCREMENT,
    bird_id     INTEGER NOT NULL REFERENCES birds(bird_id),
    location    TEXT NOT NULL,
    seen_at     TEXT NOT NULL    -- canonical minute form, %Y-%m-%dT%H:%M
);

CREATE INDEX IF NOT EXISTS sightings_bird_idx     ON sightings(bird_id);
CREATE INDEX IF NOT EXISTS sightings_location_idx ON sightings(location);
CREATE INDEX IF NOT EXISTS sightings_seen_at_idx  ON sightings(seen_at);

PRAGMA user_version = 1;
";
