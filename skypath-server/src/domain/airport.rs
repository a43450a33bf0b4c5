//! Airport code and airport types.

use std::fmt;

use chrono_tz::Tz;

/// Error returned when parsing an invalid IATA code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IATA code: {reason}")]
pub struct InvalidIataCode {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `IataCode` value is valid by construction, and it is `Copy`
/// so it can be used freely as a map key during search.
///
/// # Examples
///
/// ```
/// use skypath_server::domain::IataCode;
///
/// let jfk = IataCode::parse("JFK").unwrap();
/// assert_eq!(jfk.as_str(), "JFK");
///
/// // Lowercase is rejected by `parse`...
/// assert!(IataCode::parse("jfk").is_err());
/// // ...but accepted by `parse_normalized`.
/// assert_eq!(IataCode::parse_normalized(" jfk ").unwrap(), jfk);
///
/// assert!(IataCode::parse("JF").is_err());
/// assert!(IataCode::parse("JFKX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IataCode([u8; 3]);

impl IataCode {
    /// Parse an IATA code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidIataCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidIataCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidIataCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(IataCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse after trimming whitespace and uppercasing.
    ///
    /// Used at the boundaries (dataset records, query strings) where input
    /// casing is not under our control.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidIataCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IataCode({})", self.as_str())
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for IataCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An airport known to the catalog.
///
/// The UTC offset is not stored as a number: it is a function of the local
/// instant, resolved through the airport's IANA zone. `country` is the
/// domestic-region classification used to type connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub code: IataCode,
    pub name: String,
    pub city: String,
    pub country: String,
    pub timezone: Tz,
}

impl Airport {
    pub fn new(
        code: IataCode,
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            city: city.into(),
            country: country.into(),
            timezone,
        }
    }

    /// True if both airports lie in the same domestic region.
    pub fn same_region(&self, other: &Airport) -> bool {
        self.country == other.country
    }
}
