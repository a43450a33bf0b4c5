//! Flight segment type.
//!
//! A `Flight` is one scheduled departure on a concrete date. The catalog
//! stores one instance per dated departure, so a `Flight` is already the
//! search-time segment: its local timestamps carry the airport offsets in
//! force on that date, and its UTC instants are fixed at construction.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::time::localize;
use super::{Airport, DomainError, IataCode};

/// Identity of a flight: who operates it and with what.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlightInfo {
    pub flight_number: String,
    pub airline: String,
    pub aircraft: String,
}

impl FlightInfo {
    pub fn new(
        flight_number: impl Into<String>,
        airline: impl Into<String>,
        aircraft: impl Into<String>,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            airline: airline.into(),
            aircraft: aircraft.into(),
        }
    }
}

/// A dated flight segment with normalized times.
///
/// # Invariants
///
/// - `arrival_utc > departure_utc`
/// - `price >= 0`
/// - Local timestamps are expressed in the origin/destination airport zones
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    info: FlightInfo,
    origin: IataCode,
    destination: IataCode,
    departure_local: DateTime<Tz>,
    arrival_local: DateTime<Tz>,
    departure_utc: DateTime<Utc>,
    arrival_utc: DateTime<Utc>,
    price: Decimal,
}

impl Flight {
    /// Construct a flight from local wall-clock times at each endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `price` is negative
    /// - Either local time does not exist in its airport's zone
    /// - The flight does not arrive strictly after it departs (in UTC)
    ///
    /// # Examples
    ///
    /// ```
    /// use skypath_server::domain::{Airport, Flight, FlightInfo, IataCode};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let jfk = Airport::new(IataCode::parse("JFK").unwrap(), "JFK", "New York", "US",
    ///     chrono_tz::America::New_York);
    /// let lax = Airport::new(IataCode::parse("LAX").unwrap(), "LAX", "Los Angeles", "US",
    ///     chrono_tz::America::Los_Angeles);
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// let flight = Flight::new(
    ///     FlightInfo::new("SP101", "SkyPath", "A320"),
    ///     &jfk,
    ///     date.and_hms_opt(8, 0, 0).unwrap(),
    ///     &lax,
    ///     date.and_hms_opt(11, 15, 0).unwrap(),
    ///     Decimal::new(29900, 2),
    /// )
    /// .unwrap();
    ///
    /// // 08:00 EDT is 12:00Z; 11:15 PDT is 18:15Z
    /// assert_eq!(flight.duration_minutes(), 375);
    /// ```
    pub fn new(
        info: FlightInfo,
        origin: &Airport,
        departure: NaiveDateTime,
        destination: &Airport,
        arrival: NaiveDateTime,
        price: Decimal,
    ) -> Result<Self, DomainError> {
        if price < Decimal::ZERO {
            return Err(DomainError::NegativePrice(info.flight_number));
        }

        let departure_local = localize(origin, departure.date(), departure.time())?;
        let arrival_local = localize(destination, arrival.date(), arrival.time())?;
        let departure_utc = departure_local.with_timezone(&Utc);
        let arrival_utc = arrival_local.with_timezone(&Utc);

        if arrival_utc <= departure_utc {
            return Err(DomainError::NonPositiveDuration(info.flight_number));
        }

        Ok(Flight {
            info,
            origin: origin.code,
            destination: destination.code,
            departure_local,
            arrival_local,
            departure_utc,
            arrival_utc,
            price,
        })
    }

    pub fn flight_number(&self) -> &str {
        &self.info.flight_number
    }

    pub fn airline(&self) -> &str {
        &self.info.airline
    }

    pub fn aircraft(&self) -> &str {
        &self.info.aircraft
    }

    pub fn origin(&self) -> IataCode {
        self.origin
    }

    pub fn destination(&self) -> IataCode {
        self.destination
    }

    /// Departure in the origin airport's local time, with offset.
    pub fn departure_local(&self) -> DateTime<Tz> {
        self.departure_local
    }

    /// Arrival in the destination airport's local time, with offset.
    pub fn arrival_local(&self) -> DateTime<Tz> {
        self.arrival_local
    }

    pub fn departure_utc(&self) -> DateTime<Utc> {
        self.departure_utc
    }

    pub fn arrival_utc(&self) -> DateTime<Utc> {
        self.arrival_utc
    }

    /// Calendar date of departure in the origin airport's local calendar.
    pub fn departure_date(&self) -> NaiveDate {
        self.departure_local.date_naive()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Time in the air, measured between UTC instants.
    pub fn duration(&self) -> Duration {
        self.arrival_utc.signed_duration_since(self.departure_utc)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}
