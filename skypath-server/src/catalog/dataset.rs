//! Raw dataset records, as they appear in `flights.json`.
//!
//! Every field is optional-with-default so that one malformed record is
//! dropped during normalization instead of failing the whole load.

use serde::Deserialize;
use serde::de::Unexpected;

/// Top-level dataset document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub airports: Vec<AirportRecord>,
    #[serde(default)]
    pub flights: Vec<FlightRecord>,
}

impl Dataset {
    /// Parse a dataset document. The top level must be a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(serde::de::Error::invalid_type(
                unexpected(&value),
                &"a dataset object",
            ));
        }
        serde_json::from_value(value)
    }
}

fn unexpected(value: &serde_json::Value) -> Unexpected<'_> {
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(_) => Unexpected::Other("number"),
        serde_json::Value::String(s) => Unexpected::Str(s.as_str()),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AirportRecord {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    /// IANA zone name, e.g. `America/New_York`.
    pub timezone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightRecord {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    /// Local to the origin, `YYYY-MM-DDTHH:MM[:SS]`.
    pub departure_time: String,
    /// Local to the destination. Either a full timestamp or a bare
    /// time-of-day that is resolved against the departure date.
    pub arrival_time: String,
    /// Number or numeric string; anything else drops the record.
    pub price: Option<serde_json::Value>,
    pub aircraft: String,
}
