//! Tool descriptions and input schemas for `tools/list`.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};

use super::ToolKind;

/// One entry of the tool catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn format_property() -> Value {
    json!({
        "type": "string",
        "enum": ["text", "markdown", "structured", "json"],
        "default": "text",
        "description": "응답 형식: text(마크다운 서술) 또는 structured(JSON)"
    })
}

fn limit_property() -> Value {
    json!({
        "type": "integer",
        "minimum": MIN_LIMIT,
        "maximum": MAX_LIMIT,
        "default": DEFAULT_LIMIT,
        "description": "최대 결과 수"
    })
}

fn schema(required: &[&str], properties: Value) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

impl ToolKind {
    /// What the tool does, for the calling agent.
    pub fn description(self) -> &'static str {
        match self {
            ToolKind::RailArrival => {
                "서울 지하철역의 실시간 열차 도착 정보를 조회합니다. 역 이름은 '강남' 또는 '강남역' 모두 가능합니다."
            }
            ToolKind::RailStatus => {
                "서울 지하철 노선별 실시간 열차 위치와 운행 현황을 조회합니다. 노선을 지정하지 않으면 1~9호선 전체를 조회합니다."
            }
            ToolKind::BusArrival => {
                "버스 정류장 번호(5자리 ARS 번호)로 실시간 버스 도착 정보를 조회합니다."
            }
            ToolKind::StopSearch => {
                "이름 또는 5자리 정류장 번호로 서울 버스 정류장을 검색합니다. 이름이 검색어로 시작하는 정류장이 먼저 표시됩니다."
            }
            ToolKind::BikeSearch => {
                "이름으로 서울 공공자전거(따릉이) 대여소를 검색하고 대여 가능한 자전거 수를 보여줍니다."
            }
            ToolKind::Location => {
                "장소나 역 이름으로 주변 지하철 도착 정보, 버스 정류장, 따릉이 대여소를 한 번에 조회합니다."
            }
        }
    }

    /// JSON schema of the tool's argument object.
    pub fn input_schema(self) -> Value {
        match self {
            ToolKind::RailArrival => schema(
                &["station"],
                json!({
                    "station": { "type": "string", "description": "지하철역 이름 (예: 강남, 서울역)" },
                    "limit": limit_property(),
                    "format": format_property(),
                }),
            ),
            ToolKind::RailStatus => schema(
                &[],
                json!({
                    "line": { "type": "string", "description": "노선 (예: 2호선, 2, 신분당선)" },
                    "format": format_property(),
                }),
            ),
            ToolKind::BusArrival => schema(
                &["stop_id"],
                json!({
                    "stop_id": {
                        "type": "string",
                        "pattern": "^[0-9]{5}$",
                        "description": "5자리 정류장 번호 (예: 22001)"
                    },
                    "limit": limit_property(),
                    "format": format_property(),
                }),
            ),
            ToolKind::StopSearch => schema(
                &["query"],
                json!({
                    "query": { "type": "string", "description": "정류장 이름 일부 또는 5자리 정류장 번호" },
                    "limit": limit_property(),
                    "format": format_property(),
                }),
            ),
            ToolKind::BikeSearch => schema(
                &["query"],
                json!({
                    "query": { "type": "string", "description": "대여소 이름 일부 (예: 망원, 여의도)" },
                    "limit": limit_property(),
                    "format": format_property(),
                }),
            ),
            ToolKind::Location => schema(
                &["location"],
                json!({
                    "location": { "type": "string", "description": "역 또는 장소 이름 (예: 강남역)" },
                    "format": format_property(),
                }),
            ),
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// Every tool, in catalogue order.
pub fn catalog() -> Vec<ToolDescriptor> {
    ToolKind::ALL.iter().map(|k| k.descriptor()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_tool() {
        let tools = catalog();
        let names: Vec<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "get_subway_arrival",
                "get_subway_status",
                "get_bus_arrival",
                "search_bus_stop",
                "search_bike_station",
                "get_location_info",
            ]
        );
    }

    #[test]
    fn schemas_mark_required_fields() {
        let json = serde_json::to_value(ToolKind::BusArrival.descriptor()).unwrap();
        assert_eq!(json["inputSchema"]["required"], json!(["stop_id"]));
        assert_eq!(json["inputSchema"]["properties"]["limit"]["maximum"], 20);

        let json = serde_json::to_value(ToolKind::RailStatus.descriptor()).unwrap();
        assert_eq!(json["inputSchema"]["required"], json!([]));
    }
}
