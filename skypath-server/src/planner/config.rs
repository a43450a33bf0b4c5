//! Search configuration for the itinerary planner.

use chrono::Duration;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum layover for a domestic connection (minutes).
    pub min_domestic_layover_mins: i64,

    /// Minimum layover when either segment crosses a border (minutes).
    pub min_international_layover_mins: i64,

    /// Maximum layover regardless of connection type (minutes).
    pub max_layover_mins: i64,

    /// Maximum flight segments per itinerary.
    pub max_segments: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_domestic_layover_mins: i64,
        min_international_layover_mins: i64,
        max_layover_mins: i64,
        max_segments: usize,
    ) -> Self {
        Self {
            min_domestic_layover_mins,
            min_international_layover_mins,
            max_layover_mins,
            max_segments,
        }
    }

    /// Returns the domestic minimum layover as a Duration.
    pub fn min_domestic_layover(&self) -> Duration {
        Duration::minutes(self.min_domestic_layover_mins)
    }

    /// Returns the international minimum layover as a Duration.
    pub fn min_international_layover(&self) -> Duration {
        Duration::minutes(self.min_international_layover_mins)
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::minutes(self.max_layover_mins)
    }

    /// The shortest layover any connection may have.
    pub fn min_any_layover(&self) -> Duration {
        self.min_domestic_layover()
            .min(self.min_international_layover())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_domestic_layover_mins: 45,
            min_international_layover_mins: 90,
            max_layover_mins: 360, // 6 hours
            max_segments: 3,
        }
    }
}
