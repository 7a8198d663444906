//! Subway station name type.

use std::fmt;

/// Suffix Koreans commonly append to station names ("강남역").
/// The arrival feed only knows the bare name ("강남").
const STATION_SUFFIX: char = '역';

/// Error returned when a station name is empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// A normalized subway station name, as the arrival feed expects it.
///
/// Normalization trims whitespace and strips one trailing `역`, so
/// "강남역" and "강남" route to the same upstream query.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StationName;
///
/// let a = StationName::parse("강남역").unwrap();
/// let b = StationName::parse("강남").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "강남");
///
/// // A bare suffix is not a station
/// assert!(StationName::parse("역").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationName(String);

impl StationName {
    /// Parse and normalize a station name.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_suffix(STATION_SUFFIX)
            .unwrap_or(trimmed)
            .trim_end();

        if bare.is_empty() {
            return Err(InvalidStationName {
                reason: "must not be empty",
            });
        }

        Ok(StationName(bare.to_string()))
    }

    /// Returns the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
