//! Response rendering: Korean markdown text or structured JSON.
//!
//! Text responses are bounded to [`CHARACTER_LIMIT`] characters; structured
//! responses are never cut. Upstream failures of single-source tools render
//! as a normal response explaining the failure.

mod text;
mod truncate;
mod views;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{
    BikeStation, BusArrival, NameQuery, RailArrival, StationName, StopEntry, StopId, StopQuery,
};
use crate::search::{LineStatus, LocationReport, SourceOutcome};

pub use truncate::{CHARACTER_LIMIT, TRUNCATED_LENGTH, enforce_limit, format_thousands};
pub use views::{
    BikeSearchResponse, BusArrivalsResponse, ErrorResponse, LocationResponse,
    RailArrivalsResponse, RailStatusResponse, StopSearchResponse,
};

/// How a tool response is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Markdown-style narrative.
    #[default]
    #[serde(alias = "markdown")]
    Text,
    /// Pretty-printed JSON.
    #[serde(alias = "json")]
    Structured,
}

/// A rendered tool response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub format: ResponseFormat,
    pub body: String,
    /// Whether the text body was cut to the size limit.
    pub truncated: bool,
}

impl RenderedResponse {
    fn text(body: String) -> Self {
        let (body, truncated) = enforce_limit(body);
        Self {
            format: ResponseFormat::Text,
            body,
            truncated,
        }
    }

    fn structured<T: Serialize>(view: &T) -> Self {
        let body = match serde_json::to_string_pretty(view) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "failed to serialize structured response");
                serde_json::json!({ "error": { "message": e.to_string() } }).to_string()
            }
        };
        Self {
            format: ResponseFormat::Structured,
            body,
            truncated: false,
        }
    }

    /// A single-source lookup that failed upstream.
    fn failure(
        format: ResponseFormat,
        source: &'static str,
        what: &str,
        reason: &str,
    ) -> Self {
        match format {
            ResponseFormat::Text => Self::text(text::upstream_failure(what)),
            ResponseFormat::Structured => Self::structured(&ErrorResponse::new(source, reason)),
        }
    }
}

pub fn rail_arrivals(
    station: &StationName,
    outcome: &SourceOutcome<RailArrival>,
    format: ResponseFormat,
) -> RenderedResponse {
    if let Some(reason) = outcome.failure_reason() {
        return RenderedResponse::failure(format, "rail-arrival", "지하철 도착", reason);
    }
    let arrivals = outcome.records();
    match format {
        ResponseFormat::Text => RenderedResponse::text(text::rail_arrivals(station.as_str(), arrivals)),
        ResponseFormat::Structured => {
            RenderedResponse::structured(&RailArrivalsResponse::new(station.as_str(), arrivals))
        }
    }
}

/// Line-by-line status. A single failed line renders as an upstream failure;
/// with several lines each failure stays in its own section.
pub fn rail_status(lines: &[LineStatus], format: ResponseFormat) -> RenderedResponse {
    if let [only] = lines {
        if let Some(reason) = only.positions.failure_reason() {
            return RenderedResponse::failure(format, "rail-position", "지하철 운행", reason);
        }
    }
    match format {
        ResponseFormat::Text => RenderedResponse::text(text::rail_status(lines)),
        ResponseFormat::Structured => RenderedResponse::structured(&RailStatusResponse::new(lines)),
    }
}

pub fn bus_arrivals(
    stop: &StopId,
    outcome: &SourceOutcome<BusArrival>,
    format: ResponseFormat,
) -> RenderedResponse {
    if let Some(reason) = outcome.failure_reason() {
        return RenderedResponse::failure(format, "bus-arrival", "버스 도착", reason);
    }
    let arrivals = outcome.records();
    match format {
        ResponseFormat::Text => RenderedResponse::text(text::bus_arrivals(stop.as_str(), arrivals)),
        ResponseFormat::Structured => {
            RenderedResponse::structured(&BusArrivalsResponse::new(stop.as_str(), arrivals))
        }
    }
}

pub fn stop_search(
    query: &StopQuery,
    outcome: &SourceOutcome<StopEntry>,
    format: ResponseFormat,
) -> RenderedResponse {
    if let Some(reason) = outcome.failure_reason() {
        return RenderedResponse::failure(format, "stop-directory", "버스 정류장", reason);
    }
    let stops = outcome.records();
    match format {
        ResponseFormat::Text => RenderedResponse::text(text::stop_search(query.as_str(), stops)),
        ResponseFormat::Structured => {
            RenderedResponse::structured(&StopSearchResponse::new(query.as_str(), stops))
        }
    }
}

pub fn bike_search(
    query: &NameQuery,
    outcome: &SourceOutcome<BikeStation>,
    format: ResponseFormat,
) -> RenderedResponse {
    if let Some(reason) = outcome.failure_reason() {
        return RenderedResponse::failure(format, "bike-directory", "따릉이 대여소", reason);
    }
    let stations = outcome.records();
    match format {
        ResponseFormat::Text => RenderedResponse::text(text::bike_search(query.as_str(), stations)),
        ResponseFormat::Structured => {
            RenderedResponse::structured(&BikeSearchResponse::new(query.as_str(), stations))
        }
    }
}

/// The combined report. Never a failure response: failed sources show as
/// empty sections in text and in the `sources` block when structured.
pub fn location(report: &LocationReport, format: ResponseFormat) -> RenderedResponse {
    match format {
        ResponseFormat::Text => RenderedResponse::text(text::location(report)),
        ResponseFormat::Structured => RenderedResponse::structured(&LocationResponse::new(report)),
    }
}
