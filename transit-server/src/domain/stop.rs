//! Bus stop identifier type.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A valid 5-digit bus stop number (the "ARS" id printed on Seoul stop signs).
///
/// Stop numbers are always 5 ASCII digits, and leading zeros are significant
/// (`01001` is a different stop from `1001`, which is not a stop at all).
///
/// # Examples
///
/// ```
/// use transit_server::domain::StopId;
///
/// let stop = StopId::parse("01001").unwrap();
/// assert_eq!(stop.as_str(), "01001");
///
/// // Wrong length is rejected
/// assert!(StopId::parse("1001").is_err());
/// assert!(StopId::parse("123456").is_err());
///
/// // Non-digits are rejected
/// assert!(StopId::parse("0100A").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopId([u8; 5]);

impl StopId {
    /// Parse a stop id from a string.
    ///
    /// Surrounding whitespace is ignored; the rest must be exactly 5 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let bytes = s.trim().as_bytes();

        if bytes.len() != 5 {
            return Err(InvalidStopId {
                reason: "must be exactly 5 digits",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidStopId {
                reason: "must contain only ASCII digits 0-9",
            });
        }

        Ok(StopId([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.as_str())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 5-digit string parses and round-trips.
        #[test]
        fn roundtrip(s in "[0-9]{5}") {
            let stop = StopId::parse(&s).unwrap();
            prop_assert_eq!(stop.as_str(), s.as_str());
        }

        /// Wrong-length digit strings are always rejected.
        #[test]
        fn wrong_length_rejected(s in "[0-9]{0,4}|[0-9]{6,10}") {
            prop_assert!(StopId::parse(&s).is_err());
        }
    }
}
