//! Error types for `aviary-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("bird {0} not found")]
  BirdNotFound(i64),

  #[error("no bird named {0:?}")]
  BirdNameNotFound(String),

  #[error("no bird with color {0:?}")]
  BirdColorNotFound(String),

  #[error("sighting {0} not found")]
  SightingNotFound(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
