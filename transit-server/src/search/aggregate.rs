//! Concurrent fan-out across feeds with per-source failure isolation.
//!
//! A combined query asks several feeds at once. One feed failing must not
//! sink the others, so each lookup settles into a [`SourceOutcome`] that
//! keeps the failure reason for the structured output.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::labels::CORE_LINES;
use crate::domain::{
    BikeStation, NameQuery, RailArrival, StationName, StopEntry, TrainPosition,
};
use crate::feeds::{FeedError, FeedSource};

use super::scanner::{ScanPlan, scan};

/// Rail arrivals requested for a combined query.
pub const NEARBY_RAIL_LIMIT: usize = 5;

/// Stops and bike stations kept per section of a combined query.
pub const NEARBY_CAP: usize = 3;

/// How one source fared in a fan-out.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    Success(Vec<T>),
    Failed { reason: String },
}

impl<T> SourceOutcome<T> {
    /// Settle a lookup, logging failures.
    pub fn from_result(source: &'static str, result: Result<Vec<T>, FeedError>) -> Self {
        match result {
            Ok(records) => SourceOutcome::Success(records),
            Err(e) => {
                warn!(source, kind = ?e.kind(), error = %e, "source failed, continuing without it");
                SourceOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Records from a successful source; a failed source has none.
    pub fn records(&self) -> &[T] {
        match self {
            SourceOutcome::Success(records) => records,
            SourceOutcome::Failed { .. } => &[],
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            SourceOutcome::Success(_) => None,
            SourceOutcome::Failed { reason } => Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SourceOutcome::Success(_))
    }

    fn map_records(self, f: impl FnOnce(Vec<T>) -> Vec<T>) -> Self {
        match self {
            SourceOutcome::Success(records) => SourceOutcome::Success(f(records)),
            failed => failed,
        }
    }
}

/// Everything known about one location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationReport {
    pub station: StationName,
    pub rail: SourceOutcome<RailArrival>,
    pub stops: SourceOutcome<StopEntry>,
    pub bikes: SourceOutcome<BikeStation>,
}

/// Train positions on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStatus {
    pub line: String,
    pub positions: SourceOutcome<TrainPosition>,
}

/// Normalize a line filter: a bare number means that numbered line.
///
/// "2" and "2호선" both become "2호선"; named lines pass through.
pub fn line_filter(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let number = match trimmed.trim_start_matches('0') {
            "" => "0",
            n => n,
        };
        return Some(format!("{}호선", number));
    }
    Some(trimmed.to_string())
}

/// Runs combined lookups against a feed source.
pub struct Coordinator<'a, S> {
    source: &'a S,
}

impl<'a, S: FeedSource> Coordinator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Rail arrivals, nearby stops and nearby bike stations for a station,
    /// fetched concurrently.
    ///
    /// Never fails: each section carries its own outcome. Stop and bike
    /// sections keep scan order.
    pub async fn location(&self, station: &StationName) -> LocationReport {
        let query = NameQuery::station(station);

        let rail_fut = self.source.rail_arrivals(station, NEARBY_RAIL_LIMIT);
        let stops_fut = scan(
            ScanPlan::NEARBY_STOPS,
            NEARBY_CAP,
            |range| self.source.stop_page(range),
            |stop: &StopEntry| query.matches(&stop.name),
        );
        let bikes_fut = scan(
            ScanPlan::NEARBY_BIKES,
            NEARBY_CAP,
            |range| self.source.bike_page(range),
            |bike: &BikeStation| query.matches(&bike.name),
        );

        let (rail, stops, bikes) = tokio::join!(rail_fut, stops_fut, bikes_fut);

        let report = LocationReport {
            station: station.clone(),
            rail: SourceOutcome::from_result("rail-arrival", rail),
            stops: SourceOutcome::from_result("stop-directory", stops.map(|o| o.matches))
                .map_records(capped),
            bikes: SourceOutcome::from_result("bike-directory", bikes.map(|o| o.matches))
                .map_records(capped),
        };

        debug!(
            station = %station,
            rail = report.rail.records().len(),
            stops = report.stops.records().len(),
            bikes = report.bikes.records().len(),
            "location report assembled"
        );

        report
    }

    /// Train positions for one line, or for every core line when no
    /// filter is given.
    pub async fn line_status(&self, line: Option<&str>) -> Vec<LineStatus> {
        let lines: Vec<String> = match line.and_then(line_filter) {
            Some(line) => vec![line],
            None => CORE_LINES.iter().map(|l| l.to_string()).collect(),
        };

        let futures = lines.into_iter().map(|line| async move {
            let result = self.source.rail_positions(&line).await;
            LineStatus {
                positions: SourceOutcome::from_result("rail-position", result),
                line,
            }
        });

        join_all(futures).await
    }
}

fn capped<T>(mut matches: Vec<T>) -> Vec<T> {
    matches.truncate(NEARBY_CAP);
    matches
}
