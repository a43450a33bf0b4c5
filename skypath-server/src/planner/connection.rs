//! Connection rules between consecutive segments.
//!
//! A connection is legal when the second flight leaves from the airport the
//! first one landed at, and the layover sits within the bounds for the
//! connection type. All arithmetic is on UTC instants.

use std::fmt;

use chrono::Duration;

use super::config::SearchConfig;
use crate::catalog::FlightCatalog;
use crate::domain::{Flight, IataCode, minutes_between};

/// Whether a connection crosses a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Domestic,
    International,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionType::Domestic => f.write_str("domestic"),
            ConnectionType::International => f.write_str("international"),
        }
    }
}

/// Why a connection was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionRejection {
    /// Second flight leaves from a different airport
    #[error("arrives at {arrives} but next flight departs {departs}")]
    DifferentAirport { arrives: IataCode, departs: IataCode },

    /// Not enough time to connect (negative when the flight has already left)
    #[error("{kind} layover of {layover_mins} min is below the {min_mins} min minimum")]
    TooShort {
        kind: ConnectionType,
        layover_mins: i64,
        min_mins: i64,
    },

    /// Waiting longer than allowed
    #[error("layover of {layover_mins} min exceeds the {max_mins} min maximum")]
    TooLong { layover_mins: i64, max_mins: i64 },

    /// Connecting airport or segment endpoint missing from the catalog
    #[error("airport {0} is not in the catalog")]
    UnknownAirport(IataCode),
}

/// An accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub kind: ConnectionType,
    pub layover_mins: i64,
}

/// Connection validator bound to a catalog (for airport regions) and a
/// search configuration (for layover bounds).
#[derive(Debug, Clone, Copy)]
pub struct ConnectionRules<'a> {
    catalog: &'a FlightCatalog,
    config: &'a SearchConfig,
}

impl<'a> ConnectionRules<'a> {
    pub fn new(catalog: &'a FlightCatalog, config: &'a SearchConfig) -> Self {
        Self { catalog, config }
    }

    /// Classify the connection at `inbound`'s destination.
    ///
    /// The connecting airport's country is the reference: the connection is
    /// international when the inbound flight arrives from another country or
    /// the outbound flight leaves for one.
    pub fn classify(
        &self,
        inbound: &Flight,
        outbound: &Flight,
    ) -> Result<ConnectionType, ConnectionRejection> {
        let region = |code: IataCode| {
            self.catalog
                .airport(&code)
                .map(|a| a.country.as_str())
                .ok_or(ConnectionRejection::UnknownAirport(code))
        };

        let hub = region(inbound.destination())?;
        let from = region(inbound.origin())?;
        let to = region(outbound.destination())?;

        if from == hub && to == hub {
            Ok(ConnectionType::Domestic)
        } else {
            Ok(ConnectionType::International)
        }
    }

    /// Minimum layover for a connection type.
    pub fn min_layover(&self, kind: ConnectionType) -> Duration {
        match kind {
            ConnectionType::Domestic => self.config.min_domestic_layover(),
            ConnectionType::International => self.config.min_international_layover(),
        }
    }

    /// Check `prev -> next`, returning the accepted connection or the reason
    /// it was refused.
    pub fn check(&self, prev: &Flight, next: &Flight) -> Result<Connection, ConnectionRejection> {
        if prev.destination() != next.origin() {
            return Err(ConnectionRejection::DifferentAirport {
                arrives: prev.destination(),
                departs: next.origin(),
            });
        }

        let kind = self.classify(prev, next)?;
        let layover_mins = minutes_between(prev.arrival_utc(), next.departure_utc());

        // Same-minute departures still have to leave strictly after arrival.
        let min_mins = self.min_layover(kind).num_minutes();
        if layover_mins < min_mins || next.departure_utc() <= prev.arrival_utc() {
            return Err(ConnectionRejection::TooShort {
                kind,
                layover_mins,
                min_mins,
            });
        }

        let max_mins = self.config.max_layover_mins;
        if layover_mins > max_mins {
            return Err(ConnectionRejection::TooLong {
                layover_mins,
                max_mins,
            });
        }

        Ok(Connection { kind, layover_mins })
    }

    pub fn is_valid_connection(&self, prev: &Flight, next: &Flight) -> bool {
        self.check(prev, next).is_ok()
    }
}
