//! Data transfer objects for web requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::NormalizationStats;
use crate::domain::{Flight, Itinerary};

/// Query string for `GET /search`.
///
/// Fields default to empty so a missing parameter is reported the same way
/// as a malformed one.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Origin IATA code
    pub origin: String,

    /// Destination IATA code
    pub destination: String,

    /// Travel date, `YYYY-MM-DD`, in the origin's local calendar
    pub date: String,
}

/// One flight within an itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResponse {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,

    /// RFC 3339 with the origin's offset
    pub departure_time_local: String,

    /// RFC 3339 with the destination's offset
    pub arrival_time_local: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    pub aircraft: String,
}

/// A ranked itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub segments: Vec<SegmentResponse>,

    /// One entry per connection
    pub layovers_minutes: Vec<i64>,

    pub total_duration_minutes: i64,

    /// Rounded to cents
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// Response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub airports: usize,
    pub flights: usize,
    pub stats: NormalizationStats,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl SegmentResponse {
    /// Create from a domain Flight.
    pub fn from_flight(flight: &Flight) -> Self {
        Self {
            flight_number: flight.flight_number().to_string(),
            airline: flight.airline().to_string(),
            origin: flight.origin().to_string(),
            destination: flight.destination().to_string(),
            departure_time_local: flight.departure_local().to_rfc3339(),
            arrival_time_local: flight.arrival_local().to_rfc3339(),
            price: flight.price(),
            aircraft: flight.aircraft().to_string(),
        }
    }
}

impl ItineraryResponse {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            segments: itinerary
                .segments()
                .iter()
                .map(|f| SegmentResponse::from_flight(f))
                .collect(),
            layovers_minutes: itinerary.layovers_minutes().to_vec(),
            total_duration_minutes: itinerary.total_duration_minutes(),
            total_price: itinerary.total_price().round_dp(2),
        }
    }
}
