//! The read-only flight catalog and its origin index.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::loader::NormalizationStats;
use crate::domain::{Airport, Flight, IataCode};

/// Normalized airports and flights, indexed by origin airport.
///
/// Flights refer to airports by code only; there are no back-references.
/// Each origin's outbound list is sorted by departure instant (then flight
/// number), which makes enumeration deterministic and lets the planner
/// window onward flights by binary search.
#[derive(Debug, Default)]
pub struct FlightCatalog {
    airports: HashMap<IataCode, Airport>,
    flights: Vec<Arc<Flight>>,
    by_origin: HashMap<IataCode, Vec<Arc<Flight>>>,
    stats: NormalizationStats,
}

impl FlightCatalog {
    /// Build a catalog from already-normalized airports and flights.
    ///
    /// Flights whose origin or destination is not among `airports` are
    /// dropped, so the catalog only ever exposes well-formed entries.
    pub fn new(
        airports: impl IntoIterator<Item = Airport>,
        flights: impl IntoIterator<Item = Flight>,
    ) -> Self {
        let airports: HashMap<IataCode, Airport> =
            airports.into_iter().map(|a| (a.code, a)).collect();

        let mut flights: Vec<Arc<Flight>> = flights
            .into_iter()
            .filter(|f| {
                airports.contains_key(&f.origin()) && airports.contains_key(&f.destination())
            })
            .map(Arc::new)
            .collect();
        flights.sort_by(|a, b| {
            a.departure_utc()
                .cmp(&b.departure_utc())
                .then_with(|| a.flight_number().cmp(b.flight_number()))
        });

        // Stable grouping keeps the global sort within each origin.
        let mut by_origin: HashMap<IataCode, Vec<Arc<Flight>>> = HashMap::new();
        for flight in &flights {
            by_origin
                .entry(flight.origin())
                .or_default()
                .push(flight.clone());
        }

        Self {
            airports,
            flights,
            by_origin,
            stats: NormalizationStats::default(),
        }
    }

    /// An empty, valid catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach the statistics gathered while normalizing the dataset.
    pub fn with_stats(mut self, stats: NormalizationStats) -> Self {
        self.stats = stats;
        self
    }

    /// All flights departing `code`, ordered by departure instant.
    ///
    /// Unknown airports yield an empty slice.
    pub fn flights_from(&self, code: &IataCode) -> &[Arc<Flight>] {
        self.by_origin.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flights departing `code` with `earliest <= departure_utc <= latest`.
    pub fn departures_between(
        &self,
        code: &IataCode,
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    ) -> &[Arc<Flight>] {
        let flights = self.flights_from(code);
        let start = flights.partition_point(|f| f.departure_utc() < earliest);
        let end = flights.partition_point(|f| f.departure_utc() <= latest);
        if start >= end {
            return &[];
        }
        &flights[start..end]
    }

    pub fn airport(&self, code: &IataCode) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn contains_airport(&self, code: &IataCode) -> bool {
        self.airports.contains_key(code)
    }

    /// Every flight in the catalog, ordered by departure instant.
    pub fn flights(&self) -> &[Arc<Flight>] {
        &self.flights
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }

    /// True if there are no flights to search.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn stats(&self) -> &NormalizationStats {
        &self.stats
    }
}
