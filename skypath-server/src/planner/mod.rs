//! Itinerary planner using bounded depth-first search.
//!
//! This module implements the core search algorithm that answers:
//! "which flights get me from here to there, leaving on this date?"
//!
//! Paths are extended one flight at a time from the origin's departures on
//! the query date, pruned by the connection rules, capped at three segments
//! and ranked by total travel time.

mod config;
mod connection;
mod enumerate;
mod rank;
mod search;

pub use config::SearchConfig;
pub use connection::{Connection, ConnectionRejection, ConnectionRules, ConnectionType};
pub use enumerate::PathEnumerator;
pub use rank::{compare_itineraries, rank_itineraries, rank_paths};
pub use search::{Planner, SearchRequest, SearchResult};
