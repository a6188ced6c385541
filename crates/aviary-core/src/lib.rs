//! Core types and trait definitions for the Aviary bird-sighting store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod bird;
pub mod error;
pub mod service;
pub mod sighting;
pub mod store;
pub mod timestamp;
pub mod view;

pub use error::{Error, Result};
