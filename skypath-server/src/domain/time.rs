//! Local-to-UTC time normalization.
//!
//! Flight schedules are published as local wall-clock times at each
//! airport. All comparisons in the search engine happen on absolute UTC
//! instants, so every local timestamp passes through here exactly once,
//! when the catalog is built.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::{Airport, DomainError};

/// Error returned when parsing an invalid timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Attach an airport's zone to a local wall-clock time.
///
/// The offset is resolved as of that local instant, so the same airport
/// can yield different offsets on either side of a daylight-saving change.
/// An ambiguous local time (clocks going back) resolves to the earlier
/// instant. A local time inside a spring-forward gap does not exist and is
/// rejected.
///
/// # Examples
///
/// ```
/// use skypath_server::domain::{localize, Airport, IataCode};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let jfk = Airport::new(
///     IataCode::parse("JFK").unwrap(),
///     "JFK", "New York", "US",
///     chrono_tz::America::New_York,
/// );
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
///
/// let local = localize(&jfk, date, time).unwrap();
/// assert_eq!(local.to_rfc3339(), "2024-01-15T08:00:00-05:00");
/// ```
pub fn localize(
    airport: &Airport,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<DateTime<Tz>, DomainError> {
    let local = date.and_time(time);
    airport
        .timezone
        .from_local_datetime(&local)
        .earliest()
        .ok_or(DomainError::NonexistentLocalTime {
            airport: airport.code,
            local,
        })
}

/// Convert a local date and time-of-day at an airport into a UTC instant.
pub fn to_utc(
    airport: &Airport,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<DateTime<Utc>, DomainError> {
    localize(airport, date, time).map(|dt| dt.with_timezone(&Utc))
}

/// Local calendar date of arrival for a flight published with a bare
/// arrival time-of-day.
///
/// An arrival time numerically at or before the departure time means the
/// flight crosses midnight and lands the next local calendar day.
///
/// # Examples
///
/// ```
/// use skypath_server::domain::arrival_date;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let dep = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
/// let arr = NaiveTime::from_hms_opt(6, 10, 0).unwrap();
///
/// assert_eq!(arrival_date(date, dep, arr), date.succ_opt());
/// ```
pub fn arrival_date(
    departure_date: NaiveDate,
    departure_time: NaiveTime,
    arrival_time: NaiveTime,
) -> Option<NaiveDate> {
    if arrival_time <= departure_time {
        departure_date.succ_opt()
    } else {
        Some(departure_date)
    }
}

/// Whole minutes from `from` to `to`. Negative if `to` is earlier.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.signed_duration_since(from).num_minutes()
}

/// Parse an ISO local timestamp without offset, `YYYY-MM-DDTHH:MM[:SS]`.
///
/// A space is accepted in place of the `T` separator.
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, TimeError> {
    let s = s.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TimeError::new("expected YYYY-MM-DDTHH:MM[:SS]"))
}

/// Parse a bare local time-of-day, `HH:MM[:SS]`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, TimeError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| TimeError::new("expected HH:MM[:SS]"))
}

/// Parse a calendar date, `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TimeError::new("expected YYYY-MM-DD"))
}
