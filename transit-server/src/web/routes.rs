//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::feeds::FeedSource;
use crate::tools::{ToolError, catalog};

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: FeedSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/mcp", post(mcp::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page listing the tools.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate::new()
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// JSON-RPC endpoint.
///
/// Requests get a JSON-RPC response; notifications (no `id`) get
/// `202 Accepted` and no body.
async fn mcp<S>(State(state): State<AppState<S>>, body: Bytes) -> Response
where
    S: FeedSource + Send + Sync + 'static,
{
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            return Json(RpcResponse::failure(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {}", e),
            ))
            .into_response();
        }
    };

    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            return Json(RpcResponse::failure(
                Value::Null,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            ))
            .into_response();
        }
    };

    let Some(id) = request.id else {
        debug!(method = %request.method, "notification received");
        return StatusCode::ACCEPTED.into_response();
    };

    let response = match dispatch(&state, &request.method, request.params).await {
        Ok(result) => RpcResponse::success(id, result),
        Err(e) => {
            warn!(method = %request.method, code = e.code(), error = %e.message(), "request failed");
            RpcResponse::failure(id, e.code(), e.message())
        }
    };

    Json(response).into_response()
}

async fn dispatch<S>(state: &AppState<S>, method: &str, params: Value) -> Result<Value, AppError>
where
    S: FeedSource + Send + Sync + 'static,
{
    match method {
        "initialize" => to_value(InitializeResult::new()),
        "ping" => Ok(json!({})),
        "tools/list" => to_value(ToolListResult { tools: catalog() }),
        "tools/call" => {
            let params: ToolCallParams =
                serde_json::from_value(params).map_err(|e| AppError::InvalidParams {
                    message: format!("Invalid tools/call params: {}", e),
                })?;
            let text = state.tools.execute(&params.name, params.arguments).await?;
            to_value(ToolCallResult::text(text))
        }
        other => Err(AppError::MethodNotFound {
            method: other.to_string(),
        }),
    }
}

fn to_value<T: serde::Serialize>(result: T) -> Result<Value, AppError> {
    serde_json::to_value(result).map_err(|e| AppError::Internal {
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    InvalidParams { message: String },
    MethodNotFound { method: String },
    Internal { message: String },
}

impl AppError {
    /// JSON-RPC error code.
    pub fn code(&self) -> i64 {
        match self {
            AppError::InvalidParams { .. } => INVALID_PARAMS,
            AppError::MethodNotFound { .. } => METHOD_NOT_FOUND,
            AppError::Internal { .. } => INTERNAL_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::InvalidParams { message } | AppError::Internal { message } => message.clone(),
            AppError::MethodNotFound { method } => format!("Method not found: {}", method),
        }
    }
}

impl From<ToolError> for AppError {
    fn from(e: ToolError) -> Self {
        AppError::InvalidParams {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::{FakeFeeds, rail};
    use crate::tools::Tools;
    use tokio::net::TcpListener;

    async fn serve(feeds: FakeFeeds) -> String {
        let router = create_router(AppState::new(Tools::new(feeds)));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn feeds() -> FakeFeeds {
        let mut feeds = FakeFeeds::new();
        feeds.arrivals = vec![rail("강남", "1002", "전역 도착")];
        feeds
    }

    async fn rpc(base: &str, body: Value) -> Value {
        reqwest::Client::new()
            .post(format!("{base}/mcp"))
            .json(&body)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_and_index() {
        let base = serve(feeds()).await;

        let health = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(health.text().await.unwrap(), "ok");

        let index = reqwest::get(format!("{base}/")).await.unwrap();
        assert!(index.text().await.unwrap().contains("search_bike_station"));
    }

    #[tokio::test]
    async fn initialize_and_list() {
        let base = serve(feeds()).await;

        let init = rpc(&base, json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" })).await;
        assert_eq!(init["id"], 1);
        assert_eq!(init["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(init["result"]["serverInfo"]["name"], "transit-server");

        let list = rpc(&base, json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" })).await;
        assert_eq!(list["result"]["tools"].as_array().unwrap().len(), 6);
        assert!(list["result"]["tools"][0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn tool_call_returns_text_content() {
        let base = serve(feeds()).await;

        let response = rpc(
            &base,
            json!({
                "jsonrpc": "2.0",
                "id": "call-1",
                "method": "tools/call",
                "params": { "name": "get_subway_arrival", "arguments": { "station": "강남역" } }
            }),
        )
        .await;

        assert_eq!(response["id"], "call-1");
        assert_eq!(response["result"]["isError"], false);
        assert_eq!(response["result"]["content"][0]["type"], "text");
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("강남역 실시간 도착 정보"));
    }

    #[tokio::test]
    async fn errors_map_to_rpc_codes() {
        let base = serve(feeds()).await;

        let unknown_tool = rpc(
            &base,
            json!({
                "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                "params": { "name": "get_weather", "arguments": {} }
            }),
        )
        .await;
        assert_eq!(unknown_tool["error"]["code"], INVALID_PARAMS);

        let bad_argument = rpc(
            &base,
            json!({
                "jsonrpc": "2.0", "id": 2, "method": "tools/call",
                "params": { "name": "get_bus_arrival", "arguments": { "stop_id": "12" } }
            }),
        )
        .await;
        assert_eq!(bad_argument["error"]["code"], INVALID_PARAMS);

        let unknown_method =
            rpc(&base, json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list" })).await;
        assert_eq!(unknown_method["error"]["code"], METHOD_NOT_FOUND);
        assert!(unknown_method.get("result").is_none());
    }

    #[tokio::test]
    async fn unparseable_body() {
        let base = serve(feeds()).await;

        let response: Value = reqwest::Client::new()
            .post(format!("{base}/mcp"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
    }

    #[tokio::test]
    async fn notifications_are_accepted_silently() {
        let base = serve(feeds()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/mcp"))
            .json(&json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
        assert!(response.text().await.unwrap().is_empty());
    }
}
