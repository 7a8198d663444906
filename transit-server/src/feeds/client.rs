//! Seoul transit feed client.
//!
//! Builds feed URLs, fetches them through the gateway and converts the
//! bodies into domain records.

use std::time::Duration;

use reqwest::Url;

use crate::domain::{
    BikeStation, BusArrival, RailArrival, StationName, StopEntry, StopId, TrainPosition,
};

use super::convert::{
    parse_bike_page, parse_bus_arrivals, parse_rail_arrivals, parse_rail_positions,
    parse_stop_page,
};
use super::error::FeedError;
use super::gateway::{DEFAULT_BUDGET, Feed, FeedGateway};
use super::source::{FeedSource, Page, PageRange};

/// Default base URL for the Seoul open-data directory feeds.
const DEFAULT_OPEN_API_BASE_URL: &str = "http://openapi.seoul.go.kr:8088";

/// Default base URL for the realtime subway feeds.
const DEFAULT_SUBWAY_BASE_URL: &str = "http://swopenapi.seoul.go.kr/api/subway";

/// Default base URL for the Seoul bus arrival feed.
const DEFAULT_BUS_BASE_URL: &str = "http://ws.bus.go.kr/api/rest";

/// Rows requested from the position feed per line.
const POSITION_ROWS: usize = 100;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Key for the open-data directory feeds (stops, bikes)
    pub open_api_key: String,
    /// Key for the realtime subway feeds
    pub subway_api_key: String,
    /// data.go.kr service key for the bus feed, already URL-encoded
    pub bus_service_key: String,
    pub open_api_base_url: String,
    pub subway_base_url: String,
    pub bus_base_url: String,
    /// Wall-clock budget per upstream call
    pub timeout: Duration,
}

impl FeedConfig {
    /// Create a config that uses one key for every Seoul feed.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            open_api_key: api_key.clone(),
            subway_api_key: api_key.clone(),
            bus_service_key: api_key,
            open_api_base_url: DEFAULT_OPEN_API_BASE_URL.to_string(),
            subway_base_url: DEFAULT_SUBWAY_BASE_URL.to_string(),
            bus_base_url: DEFAULT_BUS_BASE_URL.to_string(),
            timeout: DEFAULT_BUDGET,
        }
    }

    /// Use a separate key for the subway feeds.
    pub fn with_subway_key(mut self, key: impl Into<String>) -> Self {
        self.subway_api_key = key.into();
        self
    }

    /// Use a separate service key for the bus feed.
    pub fn with_bus_key(mut self, key: impl Into<String>) -> Self {
        self.bus_service_key = key.into();
        self
    }

    /// Point every feed at one base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.open_api_base_url = url.clone();
        self.subway_base_url = url.clone();
        self.bus_base_url = url;
        self
    }

    /// Set the per-call budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the Seoul subway, bus, stop and bike feeds.
#[derive(Debug, Clone)]
pub struct TransitClient {
    gateway: FeedGateway,
    config: FeedConfig,
}

impl TransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let gateway = FeedGateway::new(config.timeout)?;
        Ok(Self { gateway, config })
    }

    /// Append path segments to a base URL, percent-encoding each one.
    fn endpoint(base: &str, segments: &[&str]) -> Result<Url, FeedError> {
        let mut url = Url::parse(base).map_err(|e| FeedError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FeedError::InvalidUrl(format!("{base}: cannot have a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn directory_url(&self, dataset: &str, range: PageRange) -> Result<Url, FeedError> {
        let start = range.start.to_string();
        let end = range.end.to_string();
        let mut url = Self::endpoint(
            &self.config.open_api_base_url,
            &[&self.config.open_api_key, "json", dataset, &start, &end],
        )?;
        // The directory feeds expect a trailing slash.
        url.path_segments_mut()
            .map_err(|_| FeedError::InvalidUrl(dataset.to_string()))?
            .push("");
        Ok(url)
    }

    fn subway_url(&self, service: &str, end: usize, subject: &str) -> Result<Url, FeedError> {
        let end = end.to_string();
        Self::endpoint(
            &self.config.subway_base_url,
            &[&self.config.subway_api_key, "json", service, "0", &end, subject],
        )
    }

    fn bus_url(&self, stop: &StopId) -> Result<Url, FeedError> {
        let base = Self::endpoint(
            &self.config.bus_base_url,
            &["stationinfo", "getStationByUid"],
        )?;
        // The service key is issued pre-encoded, so it is appended verbatim.
        let raw = format!(
            "{base}?serviceKey={}&arsId={}&resultType=json",
            self.config.bus_service_key,
            stop.as_str()
        );
        Url::parse(&raw).map_err(|e| FeedError::InvalidUrl(format!("bus feed: {e}")))
    }
}

impl FeedSource for TransitClient {
    async fn rail_arrivals(
        &self,
        station: &StationName,
        limit: usize,
    ) -> Result<Vec<RailArrival>, FeedError> {
        let url = self.subway_url("realtimeStationArrival", limit, station.as_str())?;
        let body = self.gateway.fetch(Feed::RailArrival, url).await?;
        parse_rail_arrivals(&body)
    }

    async fn rail_positions(&self, line: &str) -> Result<Vec<TrainPosition>, FeedError> {
        let url = self.subway_url("realtimePosition", POSITION_ROWS, line)?;
        let body = self.gateway.fetch(Feed::RailPosition, url).await?;
        parse_rail_positions(&body)
    }

    async fn bus_arrivals(&self, stop: &StopId) -> Result<Vec<BusArrival>, FeedError> {
        let url = self.bus_url(stop)?;
        let body = self.gateway.fetch(Feed::BusArrival, url).await?;
        parse_bus_arrivals(&body)
    }

    async fn stop_page(&self, range: PageRange) -> Result<Page<StopEntry>, FeedError> {
        let url = self.directory_url("busStopLocationXyInfo", range)?;
        let body = self.gateway.fetch(Feed::StopDirectory, url).await?;
        parse_stop_page(&body)
    }

    async fn bike_page(&self, range: PageRange) -> Result<Page<BikeStation>, FeedError> {
        let url = self.directory_url("bikeList", range)?;
        let body = self.gateway.fetch(Feed::BikeDirectory, url).await?;
        parse_bike_page(&body)
    }
}
