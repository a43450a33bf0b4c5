//! Itinerary types.
//!
//! An `Itinerary` is a complete trip from origin to destination made of
//! one or more flight segments. Derived figures (layovers, duration,
//! price) are computed once at construction.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::time::minutes_between;
use super::{DomainError, Flight, IataCode};

/// A complete itinerary from origin to destination.
///
/// Uses `Arc<Flight>` so segments are shared with the catalog rather than
/// copied per result.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect (destination of one = origin of next)
/// - Each segment departs strictly after the previous one arrives (UTC)
#[derive(Debug, Clone)]
pub struct Itinerary {
    segments: Vec<Arc<Flight>>,
    layovers: Vec<i64>,
    total_price: Decimal,
}

impl Itinerary {
    /// Constructs an itinerary from ordered segments.
    ///
    /// Only structural invariants are checked here; layover bounds belong
    /// to the connection rules in the planner.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - Segments list is empty
    /// - Segments don't connect (destination != next origin)
    /// - A segment departs at or before the previous arrival
    pub fn new(segments: Vec<Arc<Flight>>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        let mut layovers = Vec::with_capacity(segments.len() - 1);
        for window in segments.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if prev.destination() != next.origin() {
                return Err(DomainError::AirportsNotConnected(
                    prev.destination(),
                    next.origin(),
                ));
            }
            if next.departure_utc() <= prev.arrival_utc() {
                return Err(DomainError::SegmentsOutOfOrder(
                    next.flight_number().to_string(),
                ));
            }
            layovers.push(minutes_between(prev.arrival_utc(), next.departure_utc()));
        }

        let total_price = segments.iter().map(|s| s.price()).sum();

        Ok(Itinerary {
            segments,
            layovers,
            total_price,
        })
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Arc<Flight>] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of intermediate stops (segments - 1).
    pub fn stop_count(&self) -> usize {
        self.segments.len() - 1
    }

    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }

    /// Layover minutes at each connection, one fewer than segments.
    pub fn layovers_minutes(&self) -> &[i64] {
        &self.layovers
    }

    pub fn origin(&self) -> IataCode {
        self.first().origin()
    }

    pub fn destination(&self) -> IataCode {
        self.last().destination()
    }

    /// Every airport touched, in order: origin, each connection, destination.
    pub fn airports(&self) -> impl Iterator<Item = IataCode> + '_ {
        std::iter::once(self.origin()).chain(self.segments.iter().map(|s| s.destination()))
    }

    pub fn departure_utc(&self) -> DateTime<Utc> {
        self.first().departure_utc()
    }

    pub fn arrival_utc(&self) -> DateTime<Utc> {
        self.last().arrival_utc()
    }

    /// First departure to last arrival, layovers included.
    pub fn total_duration(&self) -> Duration {
        self.arrival_utc().signed_duration_since(self.departure_utc())
    }

    pub fn total_duration_minutes(&self) -> i64 {
        self.total_duration().num_minutes()
    }

    /// Sum of segment prices.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    fn first(&self) -> &Flight {
        // Non-empty by construction
        &self.segments[0]
    }

    fn last(&self) -> &Flight {
        &self.segments[self.segments.len() - 1]
    }
}
