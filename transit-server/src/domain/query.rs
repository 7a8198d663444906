//! Query inputs: result limits and name matching.

use std::fmt;

use super::error::QueryError;
use super::station::StationName;
use super::stop::StopId;

/// Smallest result count a caller can ask for.
pub const MIN_LIMIT: usize = 1;

/// Largest result count any tool returns.
pub const MAX_LIMIT: usize = 20;

/// Result count used when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 10;

/// A requested result count, always within `MIN_LIMIT..=MAX_LIMIT`.
///
/// Out-of-range requests are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Limit(usize);

impl Limit {
    /// Clamp a raw request into range.
    pub fn clamped(requested: i64) -> Self {
        let clamped = requested.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64);
        Limit(clamped as usize)
    }

    /// Clamp an optional request, falling back to `DEFAULT_LIMIT`.
    pub fn from_request(requested: Option<i64>) -> Self {
        requested.map_or_else(Self::default, Self::clamped)
    }

    /// The clamped count.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Limit(DEFAULT_LIMIT)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text name query, matched case-insensitively.
#[derive(Clone, PartialEq, Eq)]
pub struct NameQuery {
    raw: String,
    folded: String,
}

impl NameQuery {
    /// Parse a free-text query. Whitespace-only input is rejected.
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        Ok(Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        })
    }

    /// Match on a station name, as the combined location query does.
    pub fn station(station: &StationName) -> Self {
        let raw = station.as_str().to_string();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// The query as the caller typed it (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `name` contains the query, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.folded)
    }

    /// Whether `name` starts with the query, ignoring case.
    pub fn is_prefix_of(&self, name: &str) -> bool {
        name.to_lowercase().starts_with(&self.folded)
    }
}

impl fmt::Debug for NameQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameQuery({})", self.raw)
    }
}

/// A bus stop directory query: an exact stop number or a name fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopQuery {
    /// Exact match on the 5-digit stop number.
    Id(StopId),
    /// Case-insensitive substring match on the stop name.
    Name(NameQuery),
}

impl StopQuery {
    /// Parse a query. Five digits are always taken as a stop number.
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        match StopId::parse(s) {
            Ok(id) => Ok(StopQuery::Id(id)),
            Err(_) => NameQuery::parse(s).map(StopQuery::Name),
        }
    }

    /// The query text for display.
    pub fn as_str(&self) -> &str {
        match self {
            StopQuery::Id(id) => id.as_str(),
            StopQuery::Name(name) => name.as_str(),
        }
    }

    /// Whether a stop with this number and name satisfies the query.
    pub fn matches(&self, stop_id: &str, name: &str) -> bool {
        match self {
            StopQuery::Id(id) => stop_id == id.as_str(),
            StopQuery::Name(query) => query.matches(name),
        }
    }

    /// The name query, if this is a free-text search.
    pub fn name_query(&self) -> Option<&NameQuery> {
        match self {
            StopQuery::Id(_) => None,
            StopQuery::Name(query) => Some(query),
        }
    }
}
