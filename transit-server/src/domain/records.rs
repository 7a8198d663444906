//! Validated feed records.
//!
//! Each upstream feed is converted into one of these types at the client
//! boundary. Scanning, ranking and rendering only ever see these, never the
//! raw feed shapes.

use chrono::NaiveDateTime;

/// Something with a display name that can be searched and ranked.
pub trait Named {
    fn name(&self) -> &str;
}

/// A train approaching a subway station.
#[derive(Debug, Clone, PartialEq)]
pub struct RailArrival {
    /// Line identifier (`1002` = Line 2).
    pub line_id: String,
    /// Station the board is for.
    pub station: String,
    /// Direction as the feed words it (상행/하행/내선/외선).
    pub direction: String,
    /// Headsign, e.g. "성수행 - 역삼방면".
    pub headsign: String,
    /// Terminus station name.
    pub terminus: Option<String>,
    pub train_no: Option<String>,
    /// Service kind (일반/급행/ITX...).
    pub train_kind: Option<String>,
    /// Seconds until arrival, when the feed gives a non-zero estimate.
    pub seconds_to_arrival: Option<u32>,
    /// Primary arrival message, e.g. "전역 도착".
    pub message: String,
    /// Where the train currently is, e.g. "역삼".
    pub current_location: Option<String>,
    /// Arrival state code (see `labels::arrival_code_label`).
    pub arrival_code: Option<String>,
    /// When the feed received this position.
    pub received_at: Option<NaiveDateTime>,
    pub is_last_train: bool,
}

/// A train's last reported position on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainPosition {
    pub line_id: String,
    pub line_name: String,
    /// Station the train was last reported at.
    pub station: String,
    pub train_no: String,
    /// `0` = up/inner, `1` = down/outer.
    pub direction_code: Option<String>,
    pub terminus: Option<String>,
    /// Train state code (see `labels::train_status_label`).
    pub status_code: Option<String>,
    pub is_express: bool,
    pub is_last_train: bool,
    pub received_at: Option<NaiveDateTime>,
}

/// A bus route's next two arrivals at a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct BusArrival {
    /// Route number as shown on the bus, e.g. "146".
    pub route: String,
    /// Route type code (see `labels::route_type_label`).
    pub route_type: Option<String>,
    pub stop_name: String,
    /// Direction the route is heading.
    pub direction: Option<String>,
    pub next_stop: Option<String>,
    pub first_arrival: String,
    pub second_arrival: Option<String>,
}

/// A bus stop directory row.
#[derive(Debug, Clone, PartialEq)]
pub struct StopEntry {
    /// 5-digit stop number.
    pub stop_id: String,
    pub name: String,
    pub node_id: Option<String>,
    pub stop_type: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl Named for StopEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A bike-share station and its current occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeStation {
    pub station_id: String,
    pub name: String,
    pub rack_total: u32,
    pub bikes_available: u32,
    /// Occupancy as the feed reports it (percent of racks in use).
    pub occupancy_pct: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
