//! HTTP router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/mcp", post(api::mcp))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (tempfile::TempDir, Router) {
        let root = tempfile::tempdir().unwrap();
        let ds = root.path().join("0015");
        std::fs::create_dir_all(&ds).unwrap();
        std::fs::write(
            ds.join("ka-dengue-daily-summary.csv"),
            "location.admin2.name,metadata.ISOWeek,cases\n\
             Bengaluru Urban,2023-W01,12\n\
             Mysuru,2023-W01,3\n\
             Bengaluru Urban,2023-W02,9\n",
        )
        .unwrap();

        let mut config = artpark_core::Config::for_profile("ROUTER_TEST_UNSET");
        config.data.data_dir = root.path().to_path_buf();
        let state = Arc::new(AppState::new(&config).unwrap());
        (root, build_router(state))
    }

    async fn post_mcp(app: Router, body: Value) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn health_reports_corpus() {
        let (_root, app) = app();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["server"], "ARTPARK Public Data MCP Server");
        assert_eq!(body["datasets"], 1);
        assert_eq!(body["tables"], 1);
        assert_eq!(body["tools"], 4);
    }

    #[tokio::test]
    async fn mcp_tool_call_over_http() {
        let (_root, app) = app();
        let (status, bytes) = post_mcp(
            app,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {
                    "name": "4_get_data",
                    "arguments": {
                        "dataset_id": "0015",
                        "table_name": "ka-dengue-daily-summary",
                        "filters": {"location.admin2.name": "bengaluru urban"}
                    }
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["id"], 1);
        let result = &body["result"]["structuredContent"];
        assert_eq!(result["total_rows_after_filter"], 2);
        assert_eq!(result["data"][1]["metadata.ISOWeek"], "2023-W02");
    }

    #[tokio::test]
    async fn mcp_notification_is_accepted_without_body() {
        let (_root, app) = app();
        let (status, bytes) = post_mcp(
            app,
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn mcp_initialize_negotiates_version() {
        let (_root, app) = app();
        let (_, bytes) = post_mcp(
            app,
            json!({
                "jsonrpc": "2.0",
                "id": "init",
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "router-test"}
                }
            }),
        )
        .await;
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(body["result"]["serverInfo"]["name"], "artpark");
    }
}
