//! Query validation errors.
//!
//! These errors describe caller input the tools cannot act on. They are
//! distinct from upstream feed failures, which never reach the caller as
//! errors.

use super::station::InvalidStationName;
use super::stop::InvalidStopId;

/// Caller input that cannot be turned into an upstream query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Free-text query was empty after trimming
    #[error("query must not be empty")]
    EmptyQuery,

    /// Station name was empty after normalization
    #[error(transparent)]
    StationName(#[from] InvalidStationName),

    /// Stop number was not 5 digits
    #[error(transparent)]
    StopId(#[from] InvalidStopId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationName, StopId};

    #[test]
    fn error_display() {
        assert_eq!(QueryError::EmptyQuery.to_string(), "query must not be empty");

        let err: QueryError = StopId::parse("12").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid stop id: must be exactly 5 digits");

        let err: QueryError = StationName::parse("역").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid station name: must not be empty");
    }
}
