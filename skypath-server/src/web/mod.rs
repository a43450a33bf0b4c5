//! Web layer for the itinerary search engine.
//!
//! Provides HTTP endpoints for health reporting and itinerary search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
