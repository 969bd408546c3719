//! Liveness and corpus summary.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::{AppState, SERVER_NAME};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server: &'static str,
    pub version: &'static str,
    pub datasets: usize,
    pub tables: usize,
    pub tools: usize,
}

pub fn health_report(state: &AppState) -> HealthResponse {
    let (datasets, tables) = state.counts();
    HealthResponse {
        status: "healthy",
        server: SERVER_NAME,
        version: env!("CARGO_PKG_VERSION"),
        datasets,
        tables,
        tools: state.mcp.tool_count(),
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(health_report(&state))
}
