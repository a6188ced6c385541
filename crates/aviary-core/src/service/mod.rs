//! Service layer — business rules over any [`BirdStore`] backend.
//!
//! The services own the existence and referential-integrity checks; the
//! store owns transaction boundaries. Both services are stateless after
//! construction, so a clone per request is free.
//!
//! [`BirdStore`]: crate::store::BirdStore

pub mod bird;
pub mod sighting;

pub use bird::BirdService;
pub use sighting::SightingService;
