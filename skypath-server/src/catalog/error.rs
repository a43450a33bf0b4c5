//! Catalog loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading the flight dataset.
///
/// All of these are fatal at startup: the server never runs on a partially
/// loaded catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Dataset file could not be read
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON or has the wrong shape
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}
