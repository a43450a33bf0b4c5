//! Domain types for the itinerary search engine.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod airport;
mod error;
mod flight;
mod itinerary;
mod time;

pub use airport::{Airport, IataCode, InvalidIataCode};
pub use error::DomainError;
pub use flight::{Flight, FlightInfo};
pub use itinerary::Itinerary;
pub use time::{
    TimeError, arrival_date, localize, minutes_between, parse_date, parse_local_datetime,
    parse_time_of_day, to_utc,
};
