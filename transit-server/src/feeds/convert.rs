//! Conversion from feed DTOs to domain records.
//!
//! Every feed embeds its own status block in otherwise-200 responses. That
//! block is checked here, before any rows are looked at; rows that are
//! missing their identifying fields are skipped rather than failing the
//! whole page.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{BikeStation, BusArrival, RailArrival, StopEntry, TrainPosition};

use super::error::FeedError;
use super::gateway::clip;
use super::source::Page;
use super::types::{
    BikeDirectoryResponse, BikeRow, BusArrivalResponse, BusArrivalRow, DirectoryPage,
    OpenApiResult, RailArrivalResponse, RailArrivalRow, RailPositionResponse, RailPositionRow,
    StopDirectoryResponse, StopRow, SubwayStatus,
};

/// Seoul open-data code for a normal response.
const CODE_OK: &str = "INFO-000";

/// Seoul open-data code for "no matching data".
const CODE_NO_DATA: &str = "INFO-200";

/// Bus feed header codes.
const BUS_OK: &str = "0";
const BUS_NO_RESULT: &str = "4";

/// Timestamp format of `recptnDt`.
const RECEIVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What an embedded status code says about the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadStatus {
    Records,
    Empty,
}

/// Decode a JSON body, keeping a clipped copy of it on failure.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Json {
        message: e.to_string(),
        body: Some(clip(body)),
    })
}

/// Interpret a Seoul open-data (or subway) status code.
fn check_code(code: &str, message: &str) -> Result<PayloadStatus, FeedError> {
    match code {
        CODE_OK => Ok(PayloadStatus::Records),
        CODE_NO_DATA => Ok(PayloadStatus::Empty),
        _ => Err(FeedError::Payload {
            code: code.to_string(),
            message: message.to_string(),
        }),
    }
}

fn missing_status() -> FeedError {
    FeedError::Payload {
        code: "MISSING".to_string(),
        message: "response carried neither data nor a status block".to_string(),
    }
}

/// Extract rows from a directory page, honoring the embedded status.
fn directory_rows<T>(
    page: Option<DirectoryPage<T>>,
    top_level: Option<OpenApiResult>,
) -> Result<Vec<T>, FeedError> {
    match (page, top_level) {
        (Some(page), _) => {
            if let Some(result) = &page.result
                && check_code(&result.code, &result.message)? == PayloadStatus::Empty
            {
                return Ok(Vec::new());
            }
            Ok(page.row)
        }
        (None, Some(result)) => {
            // A bare status block has no rows even when it says "ok".
            check_code(&result.code, &result.message)?;
            Ok(Vec::new())
        }
        (None, None) => Err(missing_status()),
    }
}

/// Check the subway status, which lives either under `errorMessage` or at
/// the top level of an error-only body.
fn subway_status(
    nested: Option<&SubwayStatus>,
    code: Option<&str>,
    message: Option<&str>,
) -> Result<PayloadStatus, FeedError> {
    match (nested, code) {
        (Some(status), _) => check_code(&status.code, &status.message),
        (None, Some(code)) => check_code(code, message.unwrap_or_default()),
        (None, None) => Err(missing_status()),
    }
}

/// Convert directory rows, remembering how many the feed sent.
fn directory_page<R, T>(rows: Vec<R>, convert: impl Fn(R) -> Option<T>) -> Page<T> {
    let rows_returned = rows.len();
    Page {
        records: rows.into_iter().filter_map(convert).collect(),
        rows_returned,
    }
}

/// Parse a page of the bus stop directory.
pub fn parse_stop_page(body: &str) -> Result<Page<StopEntry>, FeedError> {
    let response: StopDirectoryResponse = decode(body)?;
    let rows = directory_rows(response.page, response.result)?;
    Ok(directory_page(rows, convert_stop))
}

/// Parse a page of the bike station directory.
pub fn parse_bike_page(body: &str) -> Result<Page<BikeStation>, FeedError> {
    let response: BikeDirectoryResponse = decode(body)?;
    let rows = directory_rows(response.page, response.result)?;
    Ok(directory_page(rows, convert_bike))
}

/// Parse a subway arrival board.
pub fn parse_rail_arrivals(body: &str) -> Result<Vec<RailArrival>, FeedError> {
    let response: RailArrivalResponse = decode(body)?;
    let status = subway_status(
        response.error_message.as_ref(),
        response.code.as_deref(),
        response.message.as_deref(),
    )?;
    if status == PayloadStatus::Empty {
        return Ok(Vec::new());
    }
    Ok(response
        .realtime_arrival_list
        .into_iter()
        .filter_map(convert_rail_arrival)
        .collect())
}

/// Parse a subway line position list.
pub fn parse_rail_positions(body: &str) -> Result<Vec<TrainPosition>, FeedError> {
    let response: RailPositionResponse = decode(body)?;
    let status = subway_status(
        response.error_message.as_ref(),
        response.code.as_deref(),
        response.message.as_deref(),
    )?;
    if status == PayloadStatus::Empty {
        return Ok(Vec::new());
    }
    Ok(response
        .realtime_position_list
        .into_iter()
        .filter_map(convert_train_position)
        .collect())
}

/// Parse a bus stop arrival board.
pub fn parse_bus_arrivals(body: &str) -> Result<Vec<BusArrival>, FeedError> {
    let response: BusArrivalResponse = decode(body)?;
    let header = response.header.ok_or_else(missing_status)?;

    match header.header_cd.as_deref() {
        Some(BUS_OK) => {}
        Some(BUS_NO_RESULT) => return Ok(Vec::new()),
        other => {
            return Err(FeedError::Payload {
                code: other.unwrap_or("MISSING").to_string(),
                message: header.header_msg,
            });
        }
    }

    let rows = response
        .body
        .and_then(|b| b.item_list)
        .unwrap_or_default();
    Ok(rows.into_iter().filter_map(convert_bus_arrival).collect())
}

/// Trim a field and drop it if nothing is left.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?.trim().parse().ok()
}

fn parse_count(value: Option<&str>) -> Option<u32> {
    value?.trim().parse().ok()
}

fn parse_received_at(value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value?.trim();
    // Some rows carry fractional seconds ("2024-05-01 08:15:30.0").
    let value = value.split('.').next().unwrap_or(value);
    NaiveDateTime::parse_from_str(value, RECEIVED_AT_FORMAT).ok()
}

/// Restore leading zeros dropped when a stop number was sent as a number.
fn normalize_stop_no(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > 5 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{raw:0>5}"))
}

fn convert_stop(row: StopRow) -> Option<StopEntry> {
    let name = non_empty(row.stops_nm);
    let stop_id = row.stops_no.as_deref().and_then(normalize_stop_no);

    let (Some(name), Some(stop_id)) = (name, stop_id) else {
        warn!(stop_no = ?row.stops_no, "skipping stop row without a valid number and name");
        return None;
    };

    Some(StopEntry {
        stop_id,
        name,
        node_id: non_empty(row.node_id),
        stop_type: non_empty(row.stops_type),
        longitude: parse_coordinate(row.xcrd.as_deref()),
        latitude: parse_coordinate(row.ycrd.as_deref()),
    })
}

fn convert_bike(row: BikeRow) -> Option<BikeStation> {
    let Some(name) = non_empty(row.station_name) else {
        warn!(station_id = ?row.station_id, "skipping bike row without a name");
        return None;
    };

    Some(BikeStation {
        station_id: non_empty(row.station_id).unwrap_or_default(),
        name,
        rack_total: parse_count(row.rack_tot_cnt.as_deref()).unwrap_or(0),
        bikes_available: parse_count(row.parking_bike_tot_cnt.as_deref()).unwrap_or(0),
        occupancy_pct: parse_count(row.shared.as_deref()),
        latitude: parse_coordinate(row.station_latitude.as_deref()),
        longitude: parse_coordinate(row.station_longitude.as_deref()),
    })
}

fn convert_rail_arrival(row: RailArrivalRow) -> Option<RailArrival> {
    let Some(line_id) = non_empty(row.subway_id) else {
        warn!(station = ?row.statn_nm, "skipping arrival row without a line id");
        return None;
    };

    Some(RailArrival {
        line_id,
        station: non_empty(row.statn_nm).unwrap_or_default(),
        direction: non_empty(row.updn_line).unwrap_or_default(),
        headsign: non_empty(row.train_line_nm).unwrap_or_default(),
        terminus: non_empty(row.bstatn_nm),
        train_no: non_empty(row.btrain_no),
        train_kind: non_empty(row.btrain_sttus),
        seconds_to_arrival: parse_count(row.barvl_dt.as_deref()).filter(|&s| s > 0),
        message: non_empty(row.arvl_msg2).unwrap_or_default(),
        current_location: non_empty(row.arvl_msg3),
        arrival_code: non_empty(row.arvl_cd),
        received_at: parse_received_at(row.recptn_dt.as_deref()),
        is_last_train: row.lstcar_at.as_deref() == Some("1"),
    })
}

fn convert_train_position(row: RailPositionRow) -> Option<TrainPosition> {
    let line_id = non_empty(row.subway_id);
    let train_no = non_empty(row.train_no);

    let (Some(line_id), Some(train_no)) = (line_id, train_no) else {
        warn!(station = ?row.statn_nm, "skipping position row without line id or train number");
        return None;
    };

    Some(TrainPosition {
        line_id,
        line_name: non_empty(row.subway_nm).unwrap_or_default(),
        station: non_empty(row.statn_nm).unwrap_or_default(),
        train_no,
        direction_code: non_empty(row.updn_line),
        terminus: non_empty(row.statn_tnm),
        status_code: non_empty(row.train_sttus),
        is_express: matches!(row.direct_at.as_deref(), Some("1" | "7")),
        is_last_train: row.lstcar_at.as_deref() == Some("1"),
        received_at: parse_received_at(row.recptn_dt.as_deref()),
    })
}

fn convert_bus_arrival(row: BusArrivalRow) -> Option<BusArrival> {
    let Some(route) = non_empty(row.rt_nm) else {
        warn!(stop = ?row.st_nm, "skipping bus row without a route number");
        return None;
    };

    Some(BusArrival {
        route,
        route_type: non_empty(row.route_type),
        stop_name: non_empty(row.st_nm).unwrap_or_default(),
        direction: non_empty(row.adirection),
        next_stop: non_empty(row.nxt_stn),
        first_arrival: non_empty(row.arrmsg1).unwrap_or_else(|| "정보 없음".to_string()),
        second_arrival: non_empty(row.arrmsg2),
    })
}
