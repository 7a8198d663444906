//! Korean markdown narratives for text responses.

use std::fmt::Write;

use crate::domain::labels::{
    direction_label, label_or_raw, line_name, route_type_label, train_status_label,
};
use crate::domain::{BikeStation, BusArrival, RailArrival, StopEntry, TrainPosition};
use crate::search::{LineStatus, LocationReport};

pub const NO_RAIL_ARRIVALS: &str = "도착 예정인 열차 정보가 없습니다.";
pub const NO_TRAINS: &str = "현재 운행 중인 열차 정보가 없습니다.";
pub const NO_BUS_ARRIVALS: &str = "도착 예정인 버스가 없습니다.";
pub const NO_STOPS: &str = "검색 결과와 일치하는 버스 정류장이 없습니다.";
pub const NO_BIKE_STATIONS: &str = "검색 결과와 일치하는 따릉이 대여소가 없습니다.";
pub const NO_NEARBY_RAIL: &str = "주변 지하철 도착 정보가 없습니다.";
pub const NO_NEARBY_STOPS: &str = "주변 버스 정류장 정보가 없습니다.";
pub const NO_NEARBY_BIKES: &str = "주변 따릉이 대여소 정보가 없습니다.";
pub const LINE_UNAVAILABLE: &str = "운행 정보를 가져오지 못했습니다.";

/// Explanation shown when a single-source lookup fails upstream.
pub fn upstream_failure(what: &str) -> String {
    format!(
        "⚠️ {} 정보를 가져오지 못했습니다. 공공 API 서버가 응답하지 않거나 오류를 반환했습니다. 잠시 후 다시 시도해 주세요.",
        what
    )
}

/// "3분 20초", "45초", or "곧 도착" for a wait in seconds.
pub fn format_wait(seconds: u32) -> String {
    match (seconds / 60, seconds % 60) {
        (0, 0) => "곧 도착".to_string(),
        (0, s) => format!("{}초", s),
        (m, 0) => format!("{}분", m),
        (m, s) => format!("{}분 {}초", m, s),
    }
}

fn rail_arrival_block(out: &mut String, a: &RailArrival) {
    let line = label_or_raw(&a.line_id, line_name);
    let _ = writeln!(out, "### {} · {}", line, a.headsign);

    let mut status = a.message.clone();
    if let Some(secs) = a.seconds_to_arrival {
        let _ = write!(status, " (약 {})", format_wait(secs));
    }
    let _ = writeln!(out, "- **도착**: {}", status);

    if let Some(location) = &a.current_location {
        let _ = writeln!(out, "- **현재 위치**: {}", location);
    }

    let mut train = Vec::new();
    if let Some(no) = &a.train_no {
        train.push(format!("{}열차", no));
    }
    train.push(a.direction.clone());
    if let Some(kind) = &a.train_kind {
        train.push(kind.clone());
    }
    if a.is_last_train {
        train.push("막차".to_string());
    }
    let _ = writeln!(out, "- **열차**: {}", train.join(" · "));
    out.push('\n');
}

pub fn rail_arrivals(station: &str, arrivals: &[RailArrival]) -> String {
    let mut out = format!("# 🚇 {}역 실시간 도착 정보\n\n", station);
    if arrivals.is_empty() {
        out.push_str(NO_RAIL_ARRIVALS);
        return out;
    }

    let _ = writeln!(out, "총 {}건의 도착 정보가 있습니다.\n", arrivals.len());
    for a in arrivals {
        rail_arrival_block(&mut out, a);
    }
    out
}

fn train_line(out: &mut String, p: &TrainPosition) {
    let mut parts = vec![format!("**{}열차** · {}", p.train_no, p.station)];
    if let Some(status) = p
        .status_code
        .as_deref()
        .and_then(train_status_label)
    {
        parts.push(status.to_string());
    }
    if let Some(direction) = p
        .direction_code
        .as_deref()
        .and_then(|c| direction_label(&p.line_id, c))
    {
        parts.push(direction.to_string());
    }
    if let Some(terminus) = &p.terminus {
        parts.push(format!("{}행", terminus));
    }
    if p.is_express {
        parts.push("급행".to_string());
    }
    if p.is_last_train {
        parts.push("막차".to_string());
    }
    let _ = writeln!(out, "- {}", parts.join(" · "));
}

pub fn rail_status(lines: &[LineStatus]) -> String {
    let mut out = String::from("# 🚇 지하철 운행 현황\n\n");

    for status in lines {
        let trains = status.positions.records();
        if status.positions.is_success() {
            let _ = writeln!(out, "## {} (운행 중 {}대)\n", status.line, trains.len());
        } else {
            let _ = writeln!(out, "## {}\n", status.line);
        }

        if !status.positions.is_success() {
            out.push_str(LINE_UNAVAILABLE);
            out.push('\n');
        } else if trains.is_empty() {
            out.push_str(NO_TRAINS);
            out.push('\n');
        } else {
            for p in trains {
                train_line(&mut out, p);
            }
        }
        out.push('\n');
    }
    out
}

pub fn bus_arrivals(stop_id: &str, arrivals: &[BusArrival]) -> String {
    let mut out = match arrivals.first() {
        Some(first) => format!("# 🚌 {} ({}) 버스 도착 정보\n\n", first.stop_name, stop_id),
        None => format!("# 🚌 정류장 {} 버스 도착 정보\n\n", stop_id),
    };
    if arrivals.is_empty() {
        out.push_str(NO_BUS_ARRIVALS);
        return out;
    }

    for b in arrivals {
        match b.route_type.as_deref() {
            Some(code) => {
                let _ = writeln!(out, "### {}번 ({})", b.route, label_or_raw(code, route_type_label));
            }
            None => {
                let _ = writeln!(out, "### {}번", b.route);
            }
        }
        let _ = writeln!(out, "- **첫 번째 버스**: {}", b.first_arrival);
        if let Some(second) = &b.second_arrival {
            let _ = writeln!(out, "- **두 번째 버스**: {}", second);
        }
        if let Some(direction) = &b.direction {
            let _ = writeln!(out, "- **방향**: {}", direction);
        }
        if let Some(next) = &b.next_stop {
            let _ = writeln!(out, "- **다음 정류장**: {}", next);
        }
        out.push('\n');
    }
    out
}

fn coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Option<String> {
    Some(format!("{:.6}, {:.6}", latitude?, longitude?))
}

fn stop_block(out: &mut String, index: usize, s: &StopEntry) {
    let _ = writeln!(out, "{}. **{}** (정류장 번호 {})", index + 1, s.name, s.stop_id);
    if let Some(kind) = &s.stop_type {
        let _ = writeln!(out, "   - 유형: {}", kind);
    }
    if let Some(coords) = coordinates(s.latitude, s.longitude) {
        let _ = writeln!(out, "   - 좌표: {}", coords);
    }
}

pub fn stop_search(query: &str, stops: &[StopEntry]) -> String {
    let mut out = format!("# 🚏 '{}' 버스 정류장 검색 결과\n\n", query);
    if stops.is_empty() {
        out.push_str(NO_STOPS);
        return out;
    }

    let _ = writeln!(out, "{}개의 정류장을 찾았습니다.\n", stops.len());
    for (i, s) in stops.iter().enumerate() {
        stop_block(&mut out, i, s);
    }
    out
}

fn bike_block(out: &mut String, index: usize, b: &BikeStation) {
    let _ = writeln!(out, "{}. **{}**", index + 1, b.name);
    let _ = write!(
        out,
        "   - 대여 가능: {}대 / 거치대 {}개",
        b.bikes_available, b.rack_total
    );
    if let Some(pct) = b.occupancy_pct {
        let _ = write!(out, " (거치율 {}%)", pct);
    }
    out.push('\n');
    if let Some(coords) = coordinates(b.latitude, b.longitude) {
        let _ = writeln!(out, "   - 좌표: {}", coords);
    }
}

pub fn bike_search(query: &str, stations: &[BikeStation]) -> String {
    let mut out = format!("# 🚲 '{}' 따릉이 대여소 검색 결과\n\n", query);
    if stations.is_empty() {
        out.push_str(NO_BIKE_STATIONS);
        return out;
    }

    let _ = writeln!(out, "{}개의 대여소를 찾았습니다.\n", stations.len());
    for (i, b) in stations.iter().enumerate() {
        bike_block(&mut out, i, b);
    }
    out
}

/// The combined report. Failed sections read like empty ones.
pub fn location(report: &LocationReport) -> String {
    let mut out = format!("# 📍 {} 주변 교통 정보\n\n", report.station);

    out.push_str("## 🚇 지하철 도착 정보\n\n");
    let arrivals = report.rail.records();
    if arrivals.is_empty() {
        out.push_str(NO_NEARBY_RAIL);
        out.push_str("\n\n");
    } else {
        for a in arrivals {
            rail_arrival_block(&mut out, a);
        }
    }

    out.push_str("## 🚏 주변 버스 정류장\n\n");
    let stops = report.stops.records();
    if stops.is_empty() {
        out.push_str(NO_NEARBY_STOPS);
        out.push_str("\n\n");
    } else {
        for (i, s) in stops.iter().enumerate() {
            stop_block(&mut out, i, s);
        }
        out.push('\n');
    }

    out.push_str("## 🚲 주변 따릉이 대여소\n\n");
    let bikes = report.bikes.records();
    if bikes.is_empty() {
        out.push_str(NO_NEARBY_BIKES);
    } else {
        for (i, b) in bikes.iter().enumerate() {
            bike_block(&mut out, i, b);
        }
    }
    out
}
