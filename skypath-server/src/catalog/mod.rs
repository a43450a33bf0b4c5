//! Flight catalog: the immutable, normalized dataset the planner searches.
//!
//! Built once at startup from a static JSON dataset. Records that cannot be
//! normalized are dropped and counted; the resulting catalog is read-only
//! and shared across requests without locking.

mod dataset;
mod error;
mod index;
mod loader;

pub use dataset::{AirportRecord, Dataset, FlightRecord};
pub use error::CatalogError;
pub use index::FlightCatalog;
pub use loader::{NormalizationStats, load_from_path, normalize};
