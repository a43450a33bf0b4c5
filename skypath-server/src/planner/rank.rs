//! Itinerary ranking for search results.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::warn;

use crate::domain::{Flight, Itinerary};

/// Preference order between two itineraries.
///
/// 1. Total duration in whole minutes (shorter is better)
/// 2. Total price (cheaper is better)
/// 3. First departure (earlier is better)
///
/// Durations that differ only by seconds tie on the first key.
pub fn compare_itineraries(a: &Itinerary, b: &Itinerary) -> Ordering {
    a.total_duration_minutes()
        .cmp(&b.total_duration_minutes())
        .then_with(|| a.total_price().cmp(&b.total_price()))
        .then_with(|| a.departure_utc().cmp(&b.departure_utc()))
}

/// Rank itineraries best-first.
///
/// The sort is stable, so itineraries equal on every key keep their
/// input order.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(compare_itineraries);
    itineraries
}

/// Build itineraries from candidate paths and rank them.
///
/// A path that fails itinerary validation is logged and skipped.
pub fn rank_paths(paths: impl IntoIterator<Item = Vec<Arc<Flight>>>) -> Vec<Itinerary> {
    let itineraries = paths
        .into_iter()
        .filter_map(|path| match Itinerary::new(path) {
            Ok(itinerary) => Some(itinerary),
            Err(e) => {
                warn!(error = %e, "Discarding malformed candidate path");
                None
            }
        })
        .collect();

    rank_itineraries(itineraries)
}
