//! Itinerary search facade.
//!
//! Wires the catalog, the path enumerator and the ranker together for a
//! single (origin, destination, date) query.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::FlightCatalog;
use crate::domain::{IataCode, Itinerary};

use super::config::SearchConfig;
use super::enumerate::PathEnumerator;
use super::rank::rank_paths;

/// Request for itinerary search.
///
/// Codes are assumed to be syntactically valid already; an unknown airport
/// simply finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    pub origin: IataCode,
    pub destination: IataCode,

    /// Travel date in the origin airport's local calendar.
    pub date: NaiveDate,
}

impl SearchRequest {
    pub fn new(origin: IataCode, destination: IataCode, date: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            date,
        }
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Found itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Number of partial paths examined during search.
    pub paths_explored: usize,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Itinerary planner over a read-only catalog.
///
/// Holds only shared references, so one catalog can serve any number of
/// concurrent planners.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    catalog: &'a FlightCatalog,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    pub fn new(catalog: &'a FlightCatalog, config: &'a SearchConfig) -> Self {
        Self { catalog, config }
    }

    /// Lazily enumerate unranked candidate paths for `request`.
    pub fn enumerate(&self, request: &SearchRequest) -> PathEnumerator<'a> {
        PathEnumerator::new(
            self.catalog,
            self.config,
            request.origin,
            request.destination,
            request.date,
        )
    }

    /// Find every valid itinerary for `request`, ranked best-first.
    ///
    /// Never fails: no matching flights, an unknown airport or identical
    /// endpoints all produce an empty result.
    pub fn search(&self, request: &SearchRequest) -> SearchResult {
        if request.origin == request.destination {
            return SearchResult::empty();
        }

        let mut enumerator = self.enumerate(request);
        let itineraries = rank_paths(enumerator.by_ref());
        let paths_explored = enumerator.paths_explored();

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            date = %request.date,
            paths_explored,
            itineraries = itineraries.len(),
            "Search complete"
        );

        SearchResult {
            itineraries,
            paths_explored,
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
