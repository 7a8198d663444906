//! Bus stop and bike station search over the directory feeds.

use crate::domain::{BikeStation, Limit, NameQuery, StopEntry, StopQuery};
use crate::feeds::{FeedError, FeedSource};

use super::rank::rank_by_name;
use super::scanner::{ScanPlan, scan};

/// Find bus stops matching `query`.
///
/// Name queries are ranked by match quality; stop-number queries keep scan
/// order. At most `limit` stops are returned.
pub async fn find_stops<S: FeedSource>(
    source: &S,
    plan: ScanPlan,
    query: &StopQuery,
    limit: Limit,
) -> Result<Vec<StopEntry>, FeedError> {
    let outcome = scan(
        plan,
        limit.get(),
        |range| source.stop_page(range),
        |stop: &StopEntry| query.matches(&stop.stop_id, &stop.name),
    )
    .await?;

    let mut stops = match query.name_query() {
        Some(name) => rank_by_name(outcome.matches, name),
        None => outcome.matches,
    };
    stops.truncate(limit.get());
    Ok(stops)
}

/// Find bike stations whose name contains `query`, in scan order.
pub async fn find_bikes<S: FeedSource>(
    source: &S,
    plan: ScanPlan,
    query: &NameQuery,
    limit: Limit,
) -> Result<Vec<BikeStation>, FeedError> {
    let outcome = scan(
        plan,
        limit.get(),
        |range| source.bike_page(range),
        |station: &BikeStation| query.matches(&station.name),
    )
    .await?;

    let mut stations = outcome.matches;
    stations.truncate(limit.get());
    Ok(stations)
}
