//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from dataset I/O and HTTP errors.

use chrono::NaiveDateTime;

use super::IataCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Airport code is not three letters
    #[error("invalid airport code: {0:?}")]
    InvalidAirportCode(String),

    /// Timezone name is not in the IANA database
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Local time falls in a daylight-saving gap at the airport
    #[error("local time {local} does not exist at {airport}")]
    NonexistentLocalTime { airport: IataCode, local: NaiveDateTime },

    /// Flight arrives at or before its departure instant
    #[error("flight {0} does not arrive after it departs")]
    NonPositiveDuration(String),

    /// Price below zero
    #[error("flight {0} has a negative price")]
    NegativePrice(String),

    /// Consecutive segments don't share an airport
    #[error("airports {0} and {1} are not connected")]
    AirportsNotConnected(IataCode, IataCode),

    /// A segment departs before the previous one has arrived
    #[error("flight {0} departs before the previous segment arrives")]
    SegmentsOutOfOrder(String),

    /// Itinerary has no segments
    #[error("itinerary must have at least one segment")]
    EmptyItinerary,
}
