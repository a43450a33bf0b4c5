//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::FlightCatalog;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// The catalog is built once at startup and only ever read, so handlers
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Normalized airports and flights
    pub catalog: Arc<FlightCatalog>,

    /// Itinerary planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: FlightCatalog, config: SearchConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
