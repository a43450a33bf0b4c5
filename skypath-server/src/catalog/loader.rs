//! Dataset normalization: raw records in, read-only catalog out.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::dataset::{AirportRecord, Dataset, FlightRecord};
use super::error::CatalogError;
use super::index::FlightCatalog;
use crate::domain::{
    Airport, DomainError, Flight, FlightInfo, IataCode, arrival_date, parse_local_datetime,
    parse_time_of_day,
};

/// Counts of records seen, kept and dropped while building the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationStats {
    pub raw_airports: usize,
    pub raw_flights: usize,
    pub kept_airports: usize,
    pub kept_flights: usize,
    /// Airport records with a bad code or unknown timezone.
    pub dropped_bad_airport_record: usize,
    pub dropped_invalid_airport: usize,
    pub dropped_bad_price: usize,
    pub dropped_bad_datetime: usize,
    pub dropped_bad_timezone: usize,
    pub dropped_non_positive_duration: usize,
}

impl NormalizationStats {
    pub fn dropped_flights(&self) -> usize {
        self.dropped_invalid_airport
            + self.dropped_bad_price
            + self.dropped_bad_datetime
            + self.dropped_bad_timezone
            + self.dropped_non_positive_duration
    }

    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::InvalidAirport => self.dropped_invalid_airport += 1,
            DropReason::BadPrice => self.dropped_bad_price += 1,
            DropReason::BadDatetime => self.dropped_bad_datetime += 1,
            DropReason::BadTimezone => self.dropped_bad_timezone += 1,
            DropReason::NonPositiveDuration => self.dropped_non_positive_duration += 1,
        }
    }
}

/// Why a flight record was not admitted to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropReason {
    InvalidAirport,
    BadPrice,
    BadDatetime,
    BadTimezone,
    NonPositiveDuration,
}

impl From<DomainError> for DropReason {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NegativePrice(_) => DropReason::BadPrice,
            DomainError::NonPositiveDuration(_) | DomainError::SegmentsOutOfOrder(_) => {
                DropReason::NonPositiveDuration
            }
            DomainError::UnknownTimezone(_) | DomainError::NonexistentLocalTime { .. } => {
                DropReason::BadTimezone
            }
            DomainError::InvalidAirportCode(_)
            | DomainError::AirportsNotConnected(..)
            | DomainError::EmptyItinerary => DropReason::InvalidAirport,
        }
    }
}

/// Read and normalize the dataset at `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a dataset document. Bad
/// individual records are dropped, never fatal.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<FlightCatalog, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_json(&json)?;
    Ok(normalize(dataset))
}

/// Normalize a parsed dataset into a catalog.
pub fn normalize(dataset: Dataset) -> FlightCatalog {
    let mut stats = NormalizationStats {
        raw_airports: dataset.airports.len(),
        raw_flights: dataset.flights.len(),
        ..Default::default()
    };

    let mut airports: HashMap<IataCode, Airport> = HashMap::new();
    for record in &dataset.airports {
        match normalize_airport(record) {
            Ok(airport) => {
                airports.insert(airport.code, airport);
            }
            Err(error) => {
                debug!(code = %record.code, %error, "Dropping airport record");
                stats.dropped_bad_airport_record += 1;
            }
        }
    }
    stats.kept_airports = airports.len();

    let mut flights = Vec::with_capacity(dataset.flights.len());
    for record in &dataset.flights {
        match normalize_flight(record, &airports) {
            Ok(flight) => flights.push(flight),
            Err(reason) => {
                debug!(
                    flight = %record.flight_number,
                    origin = %record.origin,
                    destination = %record.destination,
                    ?reason,
                    "Dropping flight record"
                );
                stats.record(reason);
            }
        }
    }
    stats.kept_flights = flights.len();

    log_stats(&stats);

    FlightCatalog::new(airports.into_values(), flights).with_stats(stats)
}

fn normalize_airport(record: &AirportRecord) -> Result<Airport, DomainError> {
    let code = IataCode::parse_normalized(&record.code)
        .map_err(|_| DomainError::InvalidAirportCode(record.code.trim().to_string()))?;
    let timezone = Tz::from_str(record.timezone.trim())
        .map_err(|_| DomainError::UnknownTimezone(record.timezone.trim().to_string()))?;
    Ok(Airport::new(
        code,
        record.name.trim(),
        record.city.trim(),
        record.country.trim().to_uppercase(),
        timezone,
    ))
}

fn normalize_flight(
    record: &FlightRecord,
    airports: &HashMap<IataCode, Airport>,
) -> Result<Flight, DropReason> {
    let lookup = |raw: &str| {
        IataCode::parse_normalized(raw)
            .ok()
            .and_then(|code| airports.get(&code))
            .ok_or(DropReason::InvalidAirport)
    };
    let origin = lookup(&record.origin)?;
    let destination = lookup(&record.destination)?;

    let price = record
        .price
        .as_ref()
        .and_then(parse_price)
        .ok_or(DropReason::BadPrice)?;

    let departure =
        parse_local_datetime(&record.departure_time).map_err(|_| DropReason::BadDatetime)?;
    let arrival = parse_arrival(&record.arrival_time, departure).ok_or(DropReason::BadDatetime)?;

    let info = FlightInfo::new(
        record.flight_number.trim(),
        record.airline.trim(),
        record.aircraft.trim(),
    );
    Ok(Flight::new(info, origin, departure, destination, arrival, price)?)
}

/// Full timestamps are taken as-is; a bare time-of-day lands on the
/// departure date, or the day after if it is not later than departure.
fn parse_arrival(raw: &str, departure: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Ok(arrival) = parse_local_datetime(raw) {
        return Some(arrival);
    }
    let time = parse_time_of_day(raw).ok()?;
    let date = arrival_date(departure.date(), departure.time(), time)?;
    Some(date.and_time(time))
}

fn parse_price(value: &serde_json::Value) -> Option<Decimal> {
    let text = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()?;
    (price >= Decimal::ZERO).then_some(price)
}

fn log_stats(stats: &NormalizationStats) {
    info!(
        airports = stats.kept_airports,
        flights = stats.kept_flights,
        raw_airports = stats.raw_airports,
        raw_flights = stats.raw_flights,
        "Flight catalog normalized"
    );

    let drops = [
        ("bad airport record", stats.dropped_bad_airport_record),
        ("unknown airport", stats.dropped_invalid_airport),
        ("bad price", stats.dropped_bad_price),
        ("bad datetime", stats.dropped_bad_datetime),
        ("unresolvable local time", stats.dropped_bad_timezone),
        ("non-positive duration", stats.dropped_non_positive_duration),
    ];
    for (reason, count) in drops {
        if count > 0 {
            warn!(count, reason, "Dropped dataset records");
        }
    }
}
