//! Static code-to-label tables for the Seoul feeds.
//!
//! The feeds report lines, route types and train states as opaque codes.
//! Unknown codes fall back to the raw code when rendered.

/// Subway line name for a feed line id.
pub fn line_name(line_id: &str) -> Option<&'static str> {
    let name = match line_id {
        "1001" => "1호선",
        "1002" => "2호선",
        "1003" => "3호선",
        "1004" => "4호선",
        "1005" => "5호선",
        "1006" => "6호선",
        "1007" => "7호선",
        "1008" => "8호선",
        "1009" => "9호선",
        "1032" => "GTX-A",
        "1061" => "중앙선",
        "1063" => "경의중앙선",
        "1065" => "공항철도",
        "1067" => "경춘선",
        "1075" => "수인분당선",
        "1077" => "신분당선",
        "1081" => "경강선",
        "1092" => "우이신설선",
        "1093" => "서해선",
        "1094" => "신림선",
        _ => return None,
    };
    Some(name)
}

/// Arrival state for a subway arrival code.
pub fn arrival_code_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "0" => "진입",
        "1" => "도착",
        "2" => "출발",
        "3" => "전역출발",
        "4" => "전역진입",
        "5" => "전역도착",
        "99" => "운행중",
        _ => return None,
    };
    Some(label)
}

/// Train state for a subway position status code.
pub fn train_status_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "0" => "진입",
        "1" => "도착",
        "2" => "출발",
        "3" => "전역출발",
        _ => return None,
    };
    Some(label)
}

/// Direction for a subway position direction code.
///
/// Line 2 is a loop, so its directions are inner/outer rather than up/down.
pub fn direction_label(line_id: &str, code: &str) -> Option<&'static str> {
    let circular = line_id == "1002";
    let label = match (code, circular) {
        ("0", false) => "상행",
        ("1", false) => "하행",
        ("0", true) => "내선",
        ("1", true) => "외선",
        _ => return None,
    };
    Some(label)
}

/// Bus route type for a route type code.
pub fn route_type_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "1" => "공항",
        "2" => "마을",
        "3" => "간선",
        "4" => "지선",
        "5" => "순환",
        "6" => "광역",
        "7" => "인천",
        "8" => "경기",
        "9" => "폐지",
        "0" => "공용",
        _ => return None,
    };
    Some(label)
}

/// Look up a label, falling back to the raw code.
pub fn label_or_raw(code: &str, lookup: fn(&str) -> Option<&'static str>) -> String {
    lookup(code).map_or_else(|| code.to_string(), str::to_string)
}

/// The first nine numbered lines, used when rail status has no line filter.
pub const CORE_LINES: [&str; 9] = [
    "1호선", "2호선", "3호선", "4호선", "5호선", "6호선", "7호선", "8호선", "9호선",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(line_name("1002"), Some("2호선"));
        assert_eq!(line_name("1077"), Some("신분당선"));
        assert_eq!(arrival_code_label("5"), Some("전역도착"));
        assert_eq!(route_type_label("3"), Some("간선"));
        assert_eq!(train_status_label("2"), Some("출발"));
    }

    #[test]
    fn loop_line_directions() {
        assert_eq!(direction_label("1002", "0"), Some("내선"));
        assert_eq!(direction_label("1004", "0"), Some("상행"));
        assert_eq!(direction_label("1004", "1"), Some("하행"));
        assert_eq!(direction_label("1004", "x"), None);
    }

    #[test]
    fn unknown_codes_fall_back_to_raw() {
        assert_eq!(line_name("9999"), None);
        assert_eq!(label_or_raw("9999", line_name), "9999");
        assert_eq!(label_or_raw("1001", line_name), "1호선");
    }
}
