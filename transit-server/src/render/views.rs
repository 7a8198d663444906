//! Fixed-shape JSON views for structured responses.
//!
//! Views carry the record fields plus labels derived from feed codes, so a
//! consumer never needs the code tables.

use serde::Serialize;

use crate::domain::labels::{
    arrival_code_label, direction_label, label_or_raw, line_name, route_type_label,
    train_status_label,
};
use crate::domain::{BikeStation, BusArrival, RailArrival, StopEntry, TrainPosition};
use crate::search::{LineStatus, LocationReport, SourceOutcome};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
pub struct RailArrivalView {
    pub line_id: String,
    pub line_name: String,
    pub direction: String,
    pub headsign: String,
    pub terminus: Option<String>,
    pub train_no: Option<String>,
    pub train_kind: Option<String>,
    pub seconds_to_arrival: Option<u32>,
    pub message: String,
    pub current_location: Option<String>,
    pub arrival_code: Option<String>,
    pub arrival_state: Option<String>,
    pub received_at: Option<String>,
    pub is_last_train: bool,
}

impl From<&RailArrival> for RailArrivalView {
    fn from(a: &RailArrival) -> Self {
        Self {
            line_id: a.line_id.clone(),
            line_name: label_or_raw(&a.line_id, line_name),
            direction: a.direction.clone(),
            headsign: a.headsign.clone(),
            terminus: a.terminus.clone(),
            train_no: a.train_no.clone(),
            train_kind: a.train_kind.clone(),
            seconds_to_arrival: a.seconds_to_arrival,
            message: a.message.clone(),
            current_location: a.current_location.clone(),
            arrival_code: a.arrival_code.clone(),
            arrival_state: a
                .arrival_code
                .as_deref()
                .map(|c| label_or_raw(c, arrival_code_label)),
            received_at: a.received_at.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            is_last_train: a.is_last_train,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrainPositionView {
    pub train_no: String,
    pub station: String,
    pub direction: Option<String>,
    pub terminus: Option<String>,
    pub status: Option<String>,
    pub is_express: bool,
    pub is_last_train: bool,
    pub received_at: Option<String>,
}

impl From<&TrainPosition> for TrainPositionView {
    fn from(p: &TrainPosition) -> Self {
        Self {
            train_no: p.train_no.clone(),
            station: p.station.clone(),
            direction: p.direction_code.as_deref().map(|c| {
                direction_label(&p.line_id, c).map_or_else(|| c.to_string(), str::to_string)
            }),
            terminus: p.terminus.clone(),
            status: p
                .status_code
                .as_deref()
                .map(|c| label_or_raw(c, train_status_label)),
            is_express: p.is_express,
            is_last_train: p.is_last_train,
            received_at: p.received_at.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BusArrivalView {
    pub route: String,
    pub route_type: Option<String>,
    pub route_type_label: Option<String>,
    pub direction: Option<String>,
    pub next_stop: Option<String>,
    pub first_arrival: String,
    pub second_arrival: Option<String>,
}

impl From<&BusArrival> for BusArrivalView {
    fn from(b: &BusArrival) -> Self {
        Self {
            route: b.route.clone(),
            route_type: b.route_type.clone(),
            route_type_label: b
                .route_type
                .as_deref()
                .map(|c| label_or_raw(c, route_type_label)),
            direction: b.direction.clone(),
            next_stop: b.next_stop.clone(),
            first_arrival: b.first_arrival.clone(),
            second_arrival: b.second_arrival.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StopView {
    pub stop_id: String,
    pub name: String,
    pub stop_type: Option<String>,
    pub node_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&StopEntry> for StopView {
    fn from(s: &StopEntry) -> Self {
        Self {
            stop_id: s.stop_id.clone(),
            name: s.name.clone(),
            stop_type: s.stop_type.clone(),
            node_id: s.node_id.clone(),
            latitude: s.latitude,
            longitude: s.longitude,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BikeStationView {
    pub station_id: String,
    pub name: String,
    pub bikes_available: u32,
    pub rack_total: u32,
    pub occupancy_pct: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&BikeStation> for BikeStationView {
    fn from(b: &BikeStation) -> Self {
        Self {
            station_id: b.station_id.clone(),
            name: b.name.clone(),
            bikes_available: b.bikes_available,
            rack_total: b.rack_total,
            occupancy_pct: b.occupancy_pct,
            latitude: b.latitude,
            longitude: b.longitude,
        }
    }
}

fn views<'a, T: 'a, V: From<&'a T>>(records: &'a [T]) -> Vec<V> {
    records.iter().map(V::from).collect()
}

// ============================================================================
// Response envelopes
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RailArrivalsResponse {
    pub station: String,
    pub count: usize,
    pub arrivals: Vec<RailArrivalView>,
}

impl RailArrivalsResponse {
    pub fn new(station: &str, arrivals: &[RailArrival]) -> Self {
        Self {
            station: station.to_string(),
            count: arrivals.len(),
            arrivals: views(arrivals),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LineStatusView {
    pub line: String,
    #[serde(flatten)]
    pub source: SourceStatus,
    pub count: usize,
    pub trains: Vec<TrainPositionView>,
}

#[derive(Debug, Serialize)]
pub struct RailStatusResponse {
    pub lines: Vec<LineStatusView>,
}

impl RailStatusResponse {
    pub fn new(lines: &[LineStatus]) -> Self {
        let lines = lines
            .iter()
            .map(|l| LineStatusView {
                line: l.line.clone(),
                source: SourceStatus::of(&l.positions),
                count: l.positions.records().len(),
                trains: views(l.positions.records()),
            })
            .collect();
        Self { lines }
    }
}

#[derive(Debug, Serialize)]
pub struct BusArrivalsResponse {
    pub stop_id: String,
    pub stop_name: Option<String>,
    pub count: usize,
    pub arrivals: Vec<BusArrivalView>,
}

impl BusArrivalsResponse {
    pub fn new(stop_id: &str, arrivals: &[BusArrival]) -> Self {
        Self {
            stop_id: stop_id.to_string(),
            stop_name: arrivals.first().map(|a| a.stop_name.clone()),
            count: arrivals.len(),
            arrivals: views(arrivals),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub query: String,
    pub count: usize,
    pub stops: Vec<StopView>,
}

impl StopSearchResponse {
    pub fn new(query: &str, stops: &[StopEntry]) -> Self {
        Self {
            query: query.to_string(),
            count: stops.len(),
            stops: views(stops),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BikeSearchResponse {
    pub query: String,
    pub count: usize,
    pub stations: Vec<BikeStationView>,
}

impl BikeSearchResponse {
    pub fn new(query: &str, stations: &[BikeStation]) -> Self {
        Self {
            query: query.to_string(),
            count: stations.len(),
            stations: views(stations),
        }
    }
}

/// Whether a source answered, and why not if it didn't.
#[derive(Debug, Serialize)]
pub struct SourceStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SourceStatus {
    pub fn of<T>(outcome: &SourceOutcome<T>) -> Self {
        match outcome.failure_reason() {
            None => Self {
                status: "ok",
                reason: None,
            },
            Some(reason) => Self {
                status: "failed",
                reason: Some(reason.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocationSources {
    pub subway: SourceStatus,
    pub bus_stops: SourceStatus,
    pub bike_stations: SourceStatus,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub station: String,
    pub subway_arrivals: Vec<RailArrivalView>,
    pub bus_stops: Vec<StopView>,
    pub bike_stations: Vec<BikeStationView>,
    pub sources: LocationSources,
}

impl LocationResponse {
    pub fn new(report: &LocationReport) -> Self {
        Self {
            station: report.station.as_str().to_string(),
            subway_arrivals: views(report.rail.records()),
            bus_stops: views(report.stops.records()),
            bike_stations: views(report.bikes.records()),
            sources: LocationSources {
                subway: SourceStatus::of(&report.rail),
                bus_stops: SourceStatus::of(&report.stops),
                bike_stations: SourceStatus::of(&report.bikes),
            },
        }
    }
}

/// A single-source lookup that failed upstream.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub source: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(source: &'static str, message: &str) -> Self {
        Self {
            error: ErrorBody {
                source,
                message: message.to_string(),
            },
        }
    }
}
