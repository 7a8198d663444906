//! Directory scans, ranking and combined lookups.
//!
//! Everything here is generic over [`FeedSource`](crate::feeds::FeedSource),
//! so it runs unchanged against the live client or in-memory test feeds.

mod aggregate;
mod directory;
mod rank;
mod scanner;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{
    Coordinator, LineStatus, LocationReport, NEARBY_CAP, NEARBY_RAIL_LIMIT, SourceOutcome,
    line_filter,
};
pub use directory::{find_bikes, find_stops};
pub use rank::rank_by_name;
pub use scanner::{CANDIDATE_FACTOR, ScanOutcome, ScanPlan, scan};
