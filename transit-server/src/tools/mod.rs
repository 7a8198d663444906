//! The tools exposed to the calling agent.
//!
//! A tool call names a [`ToolKind`] and passes a JSON argument object.
//! Argument problems are errors; upstream failures are not, they render
//! as normal responses explaining what went wrong.

mod args;
mod catalog;

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::domain::{Limit, NameQuery, QueryError, StationName, StopId, StopQuery};
use crate::feeds::FeedSource;
use crate::render::{self, RenderedResponse};
use crate::search::{Coordinator, ScanPlan, SourceOutcome, find_bikes, find_stops};

pub use args::{
    BikeSearchArgs, BusArrivalArgs, LocationArgs, RailArrivalArgs, RailStatusArgs, StopSearchArgs,
};
pub use catalog::{ToolDescriptor, catalog};

/// Errors a tool call can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Missing, mistyped or invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No tool with this name
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl From<QueryError> for ToolError {
    fn from(e: QueryError) -> Self {
        ToolError::InvalidArgument(e.to_string())
    }
}

/// Every tool the server offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    RailArrival,
    RailStatus,
    BusArrival,
    StopSearch,
    BikeSearch,
    Location,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::RailArrival,
        ToolKind::RailStatus,
        ToolKind::BusArrival,
        ToolKind::StopSearch,
        ToolKind::BikeSearch,
        ToolKind::Location,
    ];

    /// The identifier the agent calls the tool by.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::RailArrival => "get_subway_arrival",
            ToolKind::RailStatus => "get_subway_status",
            ToolKind::BusArrival => "get_bus_arrival",
            ToolKind::StopSearch => "search_bus_stop",
            ToolKind::BikeSearch => "search_bike_station",
            ToolKind::Location => "get_location_info",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    // A call without arguments is an empty object
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArgument(e.to_string()))
}

/// Runs tool calls against a feed source.
pub struct Tools<S> {
    source: S,
}

impl<S: FeedSource> Tools<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the tool called `name` and return the rendered body.
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let response = self.call(kind, arguments).await?;
        Ok(response.body)
    }

    /// Run one tool.
    pub async fn call(&self, kind: ToolKind, arguments: Value) -> Result<RenderedResponse, ToolError> {
        let started = Instant::now();

        let response = match kind {
            ToolKind::RailArrival => self.rail_arrival(parse_args(arguments)?).await?,
            ToolKind::RailStatus => self.rail_status(parse_args(arguments)?).await,
            ToolKind::BusArrival => self.bus_arrival(parse_args(arguments)?).await?,
            ToolKind::StopSearch => self.stop_search(parse_args(arguments)?).await?,
            ToolKind::BikeSearch => self.bike_search(parse_args(arguments)?).await?,
            ToolKind::Location => self.location(parse_args(arguments)?).await?,
        };

        info!(
            tool = kind.name(),
            format = ?response.format,
            chars = response.body.chars().count(),
            truncated = response.truncated,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tool call complete"
        );

        Ok(response)
    }

    async fn rail_arrival(&self, args: RailArrivalArgs) -> Result<RenderedResponse, ToolError> {
        let station = StationName::parse(&args.station).map_err(QueryError::from)?;
        let limit = Limit::from_request(args.limit);

        let result = self
            .source
            .rail_arrivals(&station, limit.get())
            .await
            .map(|mut arrivals| {
                arrivals.truncate(limit.get());
                arrivals
            });
        let outcome = SourceOutcome::from_result("rail-arrival", result);

        Ok(render::rail_arrivals(&station, &outcome, args.format))
    }

    async fn rail_status(&self, args: RailStatusArgs) -> RenderedResponse {
        let lines = Coordinator::new(&self.source)
            .line_status(args.line.as_deref())
            .await;

        render::rail_status(&lines, args.format)
    }

    async fn bus_arrival(&self, args: BusArrivalArgs) -> Result<RenderedResponse, ToolError> {
        let stop = StopId::parse(&args.stop_id).map_err(QueryError::from)?;
        let limit = Limit::from_request(args.limit);

        let result = self.source.bus_arrivals(&stop).await.map(|mut arrivals| {
            arrivals.truncate(limit.get());
            arrivals
        });
        let outcome = SourceOutcome::from_result("bus-arrival", result);

        Ok(render::bus_arrivals(&stop, &outcome, args.format))
    }

    async fn stop_search(&self, args: StopSearchArgs) -> Result<RenderedResponse, ToolError> {
        let query = StopQuery::parse(&args.query)?;
        let limit = Limit::from_request(args.limit);

        let result = find_stops(&self.source, ScanPlan::STOPS, &query, limit).await;
        let outcome = SourceOutcome::from_result("stop-directory", result);

        Ok(render::stop_search(&query, &outcome, args.format))
    }

    async fn bike_search(&self, args: BikeSearchArgs) -> Result<RenderedResponse, ToolError> {
        let query = NameQuery::parse(&args.query)?;
        let limit = Limit::from_request(args.limit);

        let result = find_bikes(&self.source, ScanPlan::BIKES, &query, limit).await;
        let outcome = SourceOutcome::from_result("bike-directory", result);

        Ok(render::bike_search(&query, &outcome, args.format))
    }

    async fn location(&self, args: LocationArgs) -> Result<RenderedResponse, ToolError> {
        let station = StationName::parse(&args.location).map_err(QueryError::from)?;

        let report = Coordinator::new(&self.source).location(&station).await;

        Ok(render::location(&report, args.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CHARACTER_LIMIT, ResponseFormat};
    use crate::search::testing::{FakeFeeds, bike, bus, rail, stop};
    use serde_json::json;

    fn feeds() -> FakeFeeds {
        let mut feeds = FakeFeeds::new();
        feeds.arrivals = (0..8)
            .map(|i| rail("강남", "1002", &format!("{}분 후", i + 1)))
            .collect();
        feeds.stops = vec![
            stop("22001", "강남역"),
            stop("22002", "강남구청"),
            stop("22003", "강남"),
        ];
        feeds.bikes = vec![bike("ST-1", "2301. 강남역 10번출구")];
        feeds.buses = (0..15).map(|i| bus(&format!("{}", 140 + i), "곧 도착")).collect();
        feeds
    }

    #[test]
    fn tool_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("get_weather"), None);
    }

    #[tokio::test]
    async fn unknown_tool() {
        let tools = Tools::new(feeds());
        let err = tools.execute("get_weather", json!({})).await.unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("get_weather".to_string()));
    }

    #[tokio::test]
    async fn missing_required_argument() {
        let tools = Tools::new(feeds());

        let err = tools
            .execute("get_subway_arrival", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(ref m) if m.contains("station")));

        let err = tools.execute("search_bus_stop", Value::Null).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn invalid_stop_id() {
        let tools = Tools::new(feeds());

        for bad in ["2200", "22a01", "220011", ""] {
            let err = tools
                .execute("get_bus_arrival", json!({ "stop_id": bad }))
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::InvalidArgument(_)), "{bad}");
        }
    }

    #[tokio::test]
    async fn blank_query_is_invalid() {
        let tools = Tools::new(feeds());
        let err = tools
            .execute("search_bike_station", json!({ "query": "   " }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn station_suffix_routes_to_same_query() {
        let tools = Tools::new(feeds());

        let a = tools
            .execute("get_subway_arrival", json!({ "station": "강남역" }))
            .await
            .unwrap();
        let b = tools
            .execute("get_subway_arrival", json!({ "station": "강남" }))
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(tools.source().rail_queries(), vec!["강남", "강남"]);
    }

    #[tokio::test]
    async fn limits_are_clamped() {
        let tools = Tools::new(feeds());

        for (requested, expected) in [(0, 1), (3, 3), (100, 15)] {
            let body = tools
                .execute(
                    "get_bus_arrival",
                    json!({ "stop_id": "22001", "limit": requested, "format": "json" }),
                )
                .await
                .unwrap();
            let json: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["count"], expected);
        }
    }

    #[tokio::test]
    async fn loosely_typed_limits_are_accepted() {
        let tools = Tools::new(feeds());

        for requested in [json!(5.0), json!("5")] {
            let body = tools
                .execute(
                    "get_bus_arrival",
                    json!({ "stop_id": "22001", "limit": requested, "format": "json" }),
                )
                .await
                .unwrap();
            let json: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["count"], 5);
        }
    }

    #[tokio::test]
    async fn default_limit_is_ten() {
        let tools = Tools::new(feeds());
        let body = tools
            .execute("get_bus_arrival", json!({ "stop_id": "22001", "format": "structured" }))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["count"], 10);
    }

    #[tokio::test]
    async fn stop_search_is_ranked() {
        let tools = Tools::new(feeds());
        let body = tools
            .execute("search_bus_stop", json!({ "query": "강남", "format": "json" }))
            .await
            .unwrap();

        let json: Value = serde_json::from_str(&body).unwrap();
        let names: Vec<_> = json["stops"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["강남", "강남역", "강남구청"]);
    }

    #[tokio::test]
    async fn upstream_failure_is_not_an_error() {
        let mut feeds = feeds();
        feeds.fail_bus = true;
        let tools = Tools::new(feeds);

        let body = tools
            .execute("get_bus_arrival", json!({ "stop_id": "22001" }))
            .await
            .unwrap();

        assert!(body.contains("버스 도착 정보를 가져오지 못했습니다"));
    }

    #[tokio::test]
    async fn location_survives_stop_directory_failure() {
        let mut feeds = feeds();
        feeds.fail_stops = true;
        let tools = Tools::new(feeds);

        let text = tools
            .execute("get_location_info", json!({ "location": "강남역" }))
            .await
            .unwrap();
        assert!(text.contains("### 2호선"));
        assert!(text.contains("2301. 강남역 10번출구"));
        assert!(text.contains("주변 버스 정류장 정보가 없습니다."));

        let structured = tools
            .execute("get_location_info", json!({ "location": "강남역", "format": "json" }))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&structured).unwrap();
        assert_eq!(json["sources"]["bus_stops"]["status"], "failed");
        assert_eq!(json["sources"]["subway"]["status"], "ok");
        assert_eq!(json["subway_arrivals"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn repeated_queries_render_identically() {
        let tools = Tools::new(feeds());
        let args = json!({ "location": "강남" });

        let first = tools.execute("get_location_info", args.clone()).await.unwrap();
        let second = tools.execute("get_location_info", args).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn text_bodies_stay_within_limit() {
        let mut feeds = FakeFeeds::new();
        feeds.stops = (0..1000)
            .map(|i| stop(&format!("{:05}", i), &format!("강남{}", "가".repeat(2000))))
            .collect();
        let tools = Tools::new(feeds);

        let response = tools
            .call(ToolKind::StopSearch, json!({ "query": "강남", "limit": 20 }))
            .await
            .unwrap();

        assert_eq!(response.format, ResponseFormat::Text);
        assert!(response.truncated);
        assert!(response.body.chars().count() <= CHARACTER_LIMIT + 100);
    }

    #[tokio::test]
    async fn status_without_filter_covers_core_lines() {
        let tools = Tools::new(feeds());
        let body = tools
            .execute("get_subway_status", json!({ "format": "json" }))
            .await
            .unwrap();

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["lines"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn unreachable_feeds_do_not_leak_keys() {
        use crate::feeds::{FeedConfig, TransitClient};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = FeedConfig::new("SECRET-KEY-123").with_base_url(format!("http://{addr}"));
        let tools = Tools::new(TransitClient::new(config).unwrap());

        let location = tools
            .execute("get_location_info", json!({ "location": "강남", "format": "json" }))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&location).unwrap();
        assert_eq!(json["sources"]["bike_stations"]["status"], "failed");
        assert!(!location.contains("SECRET-KEY-123"), "{location}");

        let bikes = tools
            .execute("search_bike_station", json!({ "query": "망원", "format": "json" }))
            .await
            .unwrap();
        assert!(bikes.contains("\"error\""), "{bikes}");
        assert!(!bikes.contains("SECRET-KEY-123"), "{bikes}");
    }
}
