//! Startup banner.

use tracing::info;

use crate::state::SERVER_NAME;

const RULE: &str = "======================================================================";

/// Log the banner; `http_addr` is set when serving over HTTP.
pub fn log_banner(datasets: usize, tables: usize, tools: usize, http_addr: Option<&str>) {
    info!("{RULE}");
    info!("{SERVER_NAME} v{}", env!("CARGO_PKG_VERSION"));
    info!("{RULE}");
    info!("Datasets:   {datasets} ({tables} tables)");
    info!("Tools:      {tools} (1_know -> 2_tables -> 3_metadata -> 4_data)");
    info!("Data:       https://github.com/dsih-artpark/publicdata");
    match http_addr {
        Some(addr) => {
            info!("MCP:        http://{addr}/mcp");
            info!("Health:     http://{addr}/health");
        }
        None => info!("MCP:        stdio"),
    }
    info!("{RULE}");
}
