//! The feed seam the search layer is written against.

use std::future::Future;

use crate::domain::{
    BikeStation, BusArrival, RailArrival, StationName, StopEntry, StopId, TrainPosition,
};

use super::error::FeedError;

/// A 1-based, inclusive row range of a directory feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Number of rows the range asks for.
    pub fn rows(&self) -> usize {
        self.end + 1 - self.start
    }
}

/// One fetched directory page.
///
/// `rows_returned` counts what the feed sent, including rows that were
/// dropped during conversion, so a page is short only when the dataset is.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub rows_returned: usize,
}

impl<T> Page<T> {
    /// A page where every returned row converted.
    pub fn complete(records: Vec<T>) -> Self {
        let rows_returned = records.len();
        Self {
            records,
            rows_returned,
        }
    }

    /// Whether the feed sent fewer rows than `range` asked for.
    pub fn is_short(&self, range: PageRange) -> bool {
        self.rows_returned < range.rows()
    }
}

/// Read access to the upstream feeds.
///
/// The live implementation is `TransitClient`; tests substitute in-memory
/// sources. Every method makes at most one upstream call.
pub trait FeedSource {
    /// Arrivals at a subway station, at most `limit` rows.
    fn rail_arrivals(
        &self,
        station: &StationName,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RailArrival>, FeedError>> + Send;

    /// Train positions on one subway line (e.g. "2호선").
    fn rail_positions(
        &self,
        line: &str,
    ) -> impl Future<Output = Result<Vec<TrainPosition>, FeedError>> + Send;

    /// Arrivals at a bus stop.
    fn bus_arrivals(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<BusArrival>, FeedError>> + Send;

    /// One page of the bus stop directory.
    fn stop_page(
        &self,
        range: PageRange,
    ) -> impl Future<Output = Result<Page<StopEntry>, FeedError>> + Send;

    /// One page of the bike station directory.
    fn bike_page(
        &self,
        range: PageRange,
    ) -> impl Future<Output = Result<Page<BikeStation>, FeedError>> + Send;
}
