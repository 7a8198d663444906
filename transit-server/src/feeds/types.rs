//! Feed response DTOs.
//!
//! These types map directly to the upstream JSON. They use `Option`
//! liberally because the feeds omit fields, send `null`, and switch between
//! strings and numbers for the same field depending on the row.

use serde::{Deserialize, Deserializer};

/// A scalar the feeds send either as a string or as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Deserialize an optional scalar into its string form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

// ============================================================================
// Seoul open-data directory feeds (stops, bike stations)
// ============================================================================

/// Status block shared by the Seoul open-data feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiResult {
    #[serde(rename = "CODE")]
    pub code: String,

    #[serde(rename = "MESSAGE", default)]
    pub message: String,
}

/// One page of a directory feed.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryPage<T> {
    /// Total rows in the dataset (not in this page).
    #[serde(default)]
    pub list_total_count: Option<u64>,

    #[serde(rename = "RESULT")]
    pub result: Option<OpenApiResult>,

    #[serde(default = "Vec::new")]
    pub row: Vec<T>,
}

/// Response from `busStopLocationXyInfo`.
///
/// On error the feed drops the wrapper and returns only a top-level `RESULT`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDirectoryResponse {
    #[serde(rename = "busStopLocationXyInfo")]
    pub page: Option<DirectoryPage<StopRow>>,

    #[serde(rename = "RESULT")]
    pub result: Option<OpenApiResult>,
}

/// Response from `bikeList`.
#[derive(Debug, Clone, Deserialize)]
pub struct BikeDirectoryResponse {
    #[serde(rename = "rentBikeStatus")]
    pub page: Option<DirectoryPage<BikeRow>>,

    #[serde(rename = "RESULT")]
    pub result: Option<OpenApiResult>,
}

/// A bus stop directory row.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRow {
    /// 5-digit stop number; sometimes sent as a number, losing leading zeros.
    #[serde(rename = "STOPS_NO", default, deserialize_with = "lenient_string")]
    pub stops_no: Option<String>,

    #[serde(rename = "STOPS_NM", default)]
    pub stops_nm: Option<String>,

    /// Longitude.
    #[serde(rename = "XCRD", default, deserialize_with = "lenient_string")]
    pub xcrd: Option<String>,

    /// Latitude.
    #[serde(rename = "YCRD", default, deserialize_with = "lenient_string")]
    pub ycrd: Option<String>,

    #[serde(rename = "NODE_ID", default, deserialize_with = "lenient_string")]
    pub node_id: Option<String>,

    #[serde(rename = "STOPS_TYPE", default)]
    pub stops_type: Option<String>,
}

/// A bike-share station status row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeRow {
    #[serde(default)]
    pub station_id: Option<String>,

    #[serde(default)]
    pub station_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub rack_tot_cnt: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub parking_bike_tot_cnt: Option<String>,

    /// Rack occupancy percentage.
    #[serde(default, deserialize_with = "lenient_string")]
    pub shared: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub station_latitude: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub station_longitude: Option<String>,
}

// ============================================================================
// Subway realtime feeds
// ============================================================================

/// Status block of the subway feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct SubwayStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,

    pub code: String,

    #[serde(default)]
    pub message: String,
}

/// Response from `realtimeStationArrival`.
///
/// On error the feed returns the status fields at top level instead of
/// under `errorMessage`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailArrivalResponse {
    pub error_message: Option<SubwayStatus>,

    #[serde(default = "Vec::new")]
    pub realtime_arrival_list: Vec<RailArrivalRow>,

    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Response from `realtimePosition`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailPositionResponse {
    pub error_message: Option<SubwayStatus>,

    #[serde(default = "Vec::new")]
    pub realtime_position_list: Vec<RailPositionRow>,

    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// An arrival row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailArrivalRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subway_id: Option<String>,

    /// Direction (상행/하행/내선/외선).
    #[serde(default)]
    pub updn_line: Option<String>,

    /// Headsign ("성수행 - 역삼방면").
    #[serde(default)]
    pub train_line_nm: Option<String>,

    #[serde(default)]
    pub statn_nm: Option<String>,

    /// Service kind (일반/급행).
    #[serde(default)]
    pub btrain_sttus: Option<String>,

    /// Seconds to arrival; "0" when unknown.
    #[serde(default, deserialize_with = "lenient_string")]
    pub barvl_dt: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub btrain_no: Option<String>,

    /// Terminus.
    #[serde(default)]
    pub bstatn_nm: Option<String>,

    /// "yyyy-MM-dd HH:mm:ss".
    #[serde(default)]
    pub recptn_dt: Option<String>,

    #[serde(default)]
    pub arvl_msg2: Option<String>,

    #[serde(default)]
    pub arvl_msg3: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub arvl_cd: Option<String>,

    /// "1" for the last train of the day.
    #[serde(default, deserialize_with = "lenient_string")]
    pub lstcar_at: Option<String>,
}

/// A train position row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailPositionRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subway_id: Option<String>,

    #[serde(default)]
    pub subway_nm: Option<String>,

    #[serde(default)]
    pub statn_nm: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub train_no: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub updn_line: Option<String>,

    #[serde(default)]
    pub statn_tnm: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub train_sttus: Option<String>,

    /// "1" express, "7" special express, "0" regular.
    #[serde(default, deserialize_with = "lenient_string")]
    pub direct_at: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub lstcar_at: Option<String>,

    #[serde(default)]
    pub recptn_dt: Option<String>,
}

// ============================================================================
// Bus arrival feed
// ============================================================================

/// Response from `stationinfo/getStationByUid`.
#[derive(Debug, Clone, Deserialize)]
pub struct BusArrivalResponse {
    #[serde(rename = "msgHeader")]
    pub header: Option<BusHeader>,

    #[serde(rename = "msgBody")]
    pub body: Option<BusBody>,
}

/// Status header of the bus feed.
#[derive(Debug, Clone, Deserialize)]
pub struct BusHeader {
    /// "0" ok, "4" no result, anything else is an error.
    #[serde(rename = "headerCd", default, deserialize_with = "lenient_string")]
    pub header_cd: Option<String>,

    #[serde(rename = "headerMsg", default)]
    pub header_msg: String,
}

/// Body of the bus feed.
#[derive(Debug, Clone, Deserialize)]
pub struct BusBody {
    #[serde(rename = "itemList", default)]
    pub item_list: Option<Vec<BusArrivalRow>>,
}

/// A route's arrivals at the requested stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusArrivalRow {
    /// Route number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub rt_nm: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub route_type: Option<String>,

    /// Stop name.
    #[serde(default)]
    pub st_nm: Option<String>,

    #[serde(default)]
    pub adirection: Option<String>,

    /// Next stop on the route.
    #[serde(default)]
    pub nxt_stn: Option<String>,

    /// First bus message ("3분후[1번째 전]").
    #[serde(default)]
    pub arrmsg1: Option<String>,

    /// Second bus message.
    #[serde(default)]
    pub arrmsg2: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_stop_page() {
        let json = r#"{
            "busStopLocationXyInfo": {
                "list_total_count": 11290,
                "RESULT": {"CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다"},
                "row": [
                    {"STOPS_NO": "01001", "STOPS_NM": "종로2가사거리", "XCRD": "126.987752", "YCRD": "37.569808", "NODE_ID": "100000001", "STOPS_TYPE": "중앙차로"},
                    {"STOPS_NO": 1002, "STOPS_NM": "창경궁.서울대학교병원", "XCRD": 126.996566, "YCRD": 37.579183, "NODE_ID": 100000002, "STOPS_TYPE": "중앙차로"}
                ]
            }
        }"#;

        let response: StopDirectoryResponse = serde_json::from_str(json).unwrap();
        let page = response.page.unwrap();

        assert_eq!(page.list_total_count, Some(11290));
        assert_eq!(page.result.unwrap().code, "INFO-000");
        assert_eq!(page.row.len(), 2);
        assert_eq!(page.row[0].stops_no.as_deref(), Some("01001"));
        // Numeric shapes are accepted too
        assert_eq!(page.row[1].stops_no.as_deref(), Some("1002"));
        assert_eq!(page.row[1].node_id.as_deref(), Some("100000002"));
    }

    #[test]
    fn deserialize_error_only_directory_body() {
        let json = r#"{"RESULT": {"CODE": "INFO-200", "MESSAGE": "해당하는 데이터가 없습니다."}}"#;

        let response: BikeDirectoryResponse = serde_json::from_str(json).unwrap();
        assert!(response.page.is_none());
        assert_eq!(response.result.unwrap().code, "INFO-200");
    }

    #[test]
    fn deserialize_bike_row() {
        let json = r#"{
            "rackTotCnt": "15",
            "stationName": "102. 망원역 1번출구 앞",
            "parkingBikeTotCnt": "7",
            "shared": "47",
            "stationLatitude": "37.55564880",
            "stationLongitude": "126.91062927",
            "stationId": "ST-4"
        }"#;

        let row: BikeRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.station_name.as_deref(), Some("102. 망원역 1번출구 앞"));
        assert_eq!(row.parking_bike_tot_cnt.as_deref(), Some("7"));
        assert_eq!(row.station_id.as_deref(), Some("ST-4"));
    }

    #[test]
    fn deserialize_rail_arrivals() {
        let json = r#"{
            "errorMessage": {"status": 200, "code": "INFO-000", "message": "정상 처리되었습니다.", "total": 1},
            "realtimeArrivalList": [
                {
                    "subwayId": "1002",
                    "updnLine": "내선",
                    "trainLineNm": "성수행 - 역삼방면",
                    "statnNm": "강남",
                    "btrainSttus": "일반",
                    "barvlDt": "120",
                    "btrainNo": "2234",
                    "bstatnNm": "성수",
                    "recptnDt": "2024-05-01 08:15:30",
                    "arvlMsg2": "2분 후 (교대)",
                    "arvlMsg3": "교대",
                    "arvlCd": "99",
                    "lstcarAt": "0"
                }
            ]
        }"#;

        let response: RailArrivalResponse = serde_json::from_str(json).unwrap();
        let status = response.error_message.unwrap();
        assert_eq!(status.code, "INFO-000");
        assert_eq!(status.status.as_deref(), Some("200"));

        let row = &response.realtime_arrival_list[0];
        assert_eq!(row.subway_id.as_deref(), Some("1002"));
        assert_eq!(row.barvl_dt.as_deref(), Some("120"));
        assert_eq!(row.arvl_msg2.as_deref(), Some("2분 후 (교대)"));
    }

    #[test]
    fn deserialize_rail_error_body() {
        let json = r#"{"status": 500, "code": "INFO-200", "message": "해당하는 데이터가 없습니다.", "link": "", "developerMessage": "", "total": 0}"#;

        let response: RailArrivalResponse = serde_json::from_str(json).unwrap();
        assert!(response.error_message.is_none());
        assert!(response.realtime_arrival_list.is_empty());
        assert_eq!(response.code.as_deref(), Some("INFO-200"));
    }

    #[test]
    fn deserialize_bus_arrivals() {
        let json = r#"{
            "comMsgHeader": {"errMsg": null, "responseTime": null},
            "msgHeader": {"headerCd": "0", "headerMsg": "정상적으로 처리되었습니다.", "itemCount": 0},
            "msgBody": {
                "itemList": [
                    {"rtNm": "146", "routeType": "3", "stNm": "강남역", "adirection": "상계주공7단지", "nxtStn": "역삼역", "arrmsg1": "3분후[1번째 전]", "arrmsg2": "12분후[6번째 전]"},
                    {"rtNm": 4412, "routeType": 4, "stNm": "강남역", "arrmsg1": "곧 도착", "arrmsg2": null}
                ]
            }
        }"#;

        let response: BusArrivalResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.header.unwrap().header_cd.as_deref(), Some("0"));

        let items = response.body.unwrap().item_list.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].rt_nm.as_deref(), Some("146"));
        assert_eq!(items[1].rt_nm.as_deref(), Some("4412"));
        assert_eq!(items[1].route_type.as_deref(), Some("4"));
        assert!(items[1].arrmsg2.is_none());
    }

    #[test]
    fn deserialize_bus_empty_body() {
        let json = r#"{"msgHeader": {"headerCd": "4", "headerMsg": "결과가 없습니다."}, "msgBody": {"itemList": null}}"#;

        let response: BusArrivalResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.header.unwrap().header_cd.as_deref(), Some("4"));
        assert!(response.body.unwrap().item_list.is_none());
    }
}
