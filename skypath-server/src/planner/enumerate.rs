//! Bounded-depth path enumeration over the flight catalog.
//!
//! Depth-first with an explicit stack of partial paths, so there is no
//! recursion. Each partial path is extended by one flight at a time; an
//! extension must pass the connection rules and must not revisit an
//! airport already on the path. A path stops the moment it reaches the
//! destination and is yielded as a candidate.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::trace;

use super::config::SearchConfig;
use super::connection::ConnectionRules;
use crate::catalog::FlightCatalog;
use crate::domain::{Flight, IataCode};

/// Partial path: flights borrowed from the catalog.
type PartialPath<'a> = Vec<&'a Arc<Flight>>;

/// Lazy, single-pass sequence of candidate paths for one query.
///
/// Yields each path (1 to `max_segments` flights) from `origin` to
/// `destination` whose first flight departs on `date` in the origin's
/// local calendar. Candidates come out in depth-first order; ranking is
/// the caller's job.
pub struct PathEnumerator<'a> {
    catalog: &'a FlightCatalog,
    rules: ConnectionRules<'a>,
    config: &'a SearchConfig,
    destination: IataCode,
    stack: Vec<PartialPath<'a>>,
    explored: usize,
}

impl<'a> PathEnumerator<'a> {
    pub fn new(
        catalog: &'a FlightCatalog,
        config: &'a SearchConfig,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> Self {
        let mut enumerator = Self {
            catalog,
            rules: ConnectionRules::new(catalog, config),
            config,
            destination,
            stack: Vec::new(),
            explored: 0,
        };

        if origin == destination || config.max_segments == 0 {
            return enumerator;
        }

        // Reversed so the earliest departure is popped first.
        enumerator.stack = catalog
            .flights_from(&origin)
            .iter()
            .filter(|f| f.departure_date() == date)
            .rev()
            .map(|f| vec![f])
            .collect();

        enumerator
    }

    /// Partial paths popped from the stack so far.
    pub fn paths_explored(&self) -> usize {
        self.explored
    }

    /// Push every legal one-flight extension of `path`.
    fn extend(&mut self, path: &[&'a Arc<Flight>]) {
        let Some(&last) = path.last() else {
            return;
        };
        let hub = last.destination();

        // Anything outside this window fails the layover bounds anyway.
        let earliest = last.arrival_utc() + self.config.min_any_layover();
        let latest = last.arrival_utc() + self.config.max_layover();

        let catalog = self.catalog;
        let mut children: Vec<PartialPath<'a>> = Vec::new();
        for next in catalog.departures_between(&hub, earliest, latest) {
            if visits(path, next.destination()) {
                trace!(
                    flight = next.flight_number(),
                    airport = %next.destination(),
                    "Pruned: revisits airport"
                );
                continue;
            }

            if let Err(reason) = self.rules.check(last, next) {
                trace!(
                    from = last.flight_number(),
                    to = next.flight_number(),
                    %reason,
                    "Pruned: connection rejected"
                );
                continue;
            }

            let mut extended = path.to_vec();
            extended.push(next);
            children.push(extended);
        }

        self.stack.extend(children.into_iter().rev());
    }
}

impl Iterator for PathEnumerator<'_> {
    type Item = Vec<Arc<Flight>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            self.explored += 1;

            let Some(last) = path.last() else {
                continue;
            };

            if last.destination() == self.destination {
                return Some(path.into_iter().cloned().collect());
            }

            if path.len() >= self.config.max_segments {
                continue;
            }

            self.extend(&path);
        }

        None
    }
}

/// True if `airport` is already the origin or an intermediate stop of `path`.
fn visits(path: &[&Arc<Flight>], airport: IataCode) -> bool {
    path.first().is_some_and(|f| f.origin() == airport)
        || path.iter().any(|f| f.destination() == airport)
}
