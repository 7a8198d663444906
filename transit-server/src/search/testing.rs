//! In-memory feeds for search and tool tests.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::{
    BikeStation, BusArrival, RailArrival, StationName, StopEntry, StopId, TrainPosition,
};
use crate::feeds::{FeedError, FeedSource, Page, PageRange};

pub(crate) fn stop(stop_id: &str, name: &str) -> StopEntry {
    StopEntry {
        stop_id: stop_id.to_string(),
        name: name.to_string(),
        node_id: Some(format!("1220000{}", stop_id)),
        stop_type: Some("중앙차로".to_string()),
        longitude: Some(127.0276),
        latitude: Some(37.4979),
    }
}

pub(crate) fn bike(station_id: &str, name: &str) -> BikeStation {
    BikeStation {
        station_id: station_id.to_string(),
        name: name.to_string(),
        rack_total: 10,
        bikes_available: 4,
        occupancy_pct: Some(40),
        latitude: Some(37.5559),
        longitude: Some(126.9106),
    }
}

pub(crate) fn rail(station: &str, line_id: &str, message: &str) -> RailArrival {
    RailArrival {
        line_id: line_id.to_string(),
        station: station.to_string(),
        direction: "외선".to_string(),
        headsign: "성수행 - 역삼방면".to_string(),
        terminus: Some("성수".to_string()),
        train_no: Some("2234".to_string()),
        train_kind: Some("일반".to_string()),
        seconds_to_arrival: Some(120),
        message: message.to_string(),
        current_location: Some("교대".to_string()),
        arrival_code: Some("99".to_string()),
        received_at: None,
        is_last_train: false,
    }
}

pub(crate) fn position(line: &str, station: &str, train_no: &str) -> TrainPosition {
    TrainPosition {
        line_id: "1002".to_string(),
        line_name: line.to_string(),
        station: station.to_string(),
        train_no: train_no.to_string(),
        direction_code: Some("0".to_string()),
        terminus: Some("성수".to_string()),
        status_code: Some("1".to_string()),
        is_express: false,
        is_last_train: false,
        received_at: None,
    }
}

pub(crate) fn bus(route: &str, first: &str) -> BusArrival {
    BusArrival {
        route: route.to_string(),
        route_type: Some("3".to_string()),
        stop_name: "강남역".to_string(),
        direction: Some("서울역".to_string()),
        next_stop: Some("신논현역".to_string()),
        first_arrival: first.to_string(),
        second_arrival: Some("12분후[6번째 전]".to_string()),
    }
}

fn unavailable() -> FeedError {
    FeedError::Status {
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

/// Feeds backed by vectors, with failure switches and request logs.
#[derive(Default)]
pub(crate) struct FakeFeeds {
    pub(crate) stops: Vec<StopEntry>,
    pub(crate) bikes: Vec<BikeStation>,
    pub(crate) arrivals: Vec<RailArrival>,
    pub(crate) positions: Vec<TrainPosition>,
    pub(crate) buses: Vec<BusArrival>,
    pub(crate) fail_stops: bool,
    pub(crate) fail_bikes: bool,
    pub(crate) fail_rail: bool,
    pub(crate) fail_bus: bool,
    pub(crate) failing_lines: HashSet<String>,
    stop_pages: Mutex<Vec<PageRange>>,
    bike_pages: Mutex<Vec<PageRange>>,
    rail_queries: Mutex<Vec<String>>,
    line_queries: Mutex<Vec<String>>,
}

impl FakeFeeds {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stop_pages_requested(&self) -> usize {
        self.stop_pages.lock().unwrap().len()
    }

    pub(crate) fn stop_page_ranges(&self) -> Vec<PageRange> {
        self.stop_pages.lock().unwrap().clone()
    }

    pub(crate) fn bike_page_ranges(&self) -> Vec<PageRange> {
        self.bike_pages.lock().unwrap().clone()
    }

    /// Station names the rail arrival feed was queried with.
    pub(crate) fn rail_queries(&self) -> Vec<String> {
        self.rail_queries.lock().unwrap().clone()
    }

    /// Lines the position feed was queried for, sorted.
    pub(crate) fn line_queries(&self) -> Vec<String> {
        let mut lines = self.line_queries.lock().unwrap().clone();
        lines.sort();
        lines
    }
}

fn page_of<T: Clone>(rows: &[T], range: PageRange) -> Page<T> {
    let start = (range.start - 1).min(rows.len());
    let end = range.end.min(rows.len());
    Page::complete(rows[start..end].to_vec())
}

impl FeedSource for FakeFeeds {
    async fn rail_arrivals(
        &self,
        station: &StationName,
        limit: usize,
    ) -> Result<Vec<RailArrival>, FeedError> {
        self.rail_queries
            .lock()
            .unwrap()
            .push(station.as_str().to_string());
        if self.fail_rail {
            return Err(unavailable());
        }
        Ok(self
            .arrivals
            .iter()
            .filter(|a| a.station == station.as_str())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn rail_positions(&self, line: &str) -> Result<Vec<TrainPosition>, FeedError> {
        self.line_queries.lock().unwrap().push(line.to_string());
        if self.fail_rail || self.failing_lines.contains(line) {
            return Err(FeedError::Timeout {
                budget: std::time::Duration::from_secs(10),
            });
        }
        Ok(self
            .positions
            .iter()
            .filter(|p| p.line_name == line)
            .cloned()
            .collect())
    }

    async fn bus_arrivals(&self, _stop: &StopId) -> Result<Vec<BusArrival>, FeedError> {
        if self.fail_bus {
            return Err(FeedError::Payload {
                code: "8".to_string(),
                message: "LIMITED NUMBER OF SERVICE REQUESTS EXCEEDS ERROR.".to_string(),
            });
        }
        Ok(self.buses.clone())
    }

    async fn stop_page(&self, range: PageRange) -> Result<Page<StopEntry>, FeedError> {
        self.stop_pages.lock().unwrap().push(range);
        if self.fail_stops {
            return Err(unavailable());
        }
        Ok(page_of(&self.stops, range))
    }

    async fn bike_page(&self, range: PageRange) -> Result<Page<BikeStation>, FeedError> {
        self.bike_pages.lock().unwrap().push(range);
        if self.fail_bikes {
            return Err(unavailable());
        }
        Ok(page_of(&self.bikes, range))
    }
}
