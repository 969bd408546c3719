use std::sync::Arc;

use artpark_catalog::DataStore;
use artpark_core::Config;
use artpark_mcp::McpServer;
use artpark_tool_runtime::{artpark_registry, DatasetDirectory, QueryLimits, ToolContext};

pub const SERVER_NAME: &str = "ARTPARK Public Data MCP Server";

const INSTRUCTIONS: &str = "Public health datasets from ARTPARK (dengue, livestock census, \
    FMD vaccination and surveillance, administrative geography) for Karnataka and India. \
    Always follow the workflow 1_know_about_artpark_data -> 2_get_tables -> 3_get_metadata \
    -> 4_get_data and only use column names and filter values returned by 3_get_metadata.";

/// Shared state behind both transports.
pub struct AppState {
    pub store: Arc<DataStore>,
    pub mcp: McpServer,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(DataStore::from_config(&config.data));
        let registry = artpark_registry(Arc::clone(&store))?;
        let context = ToolContext {
            directory: Arc::new(DatasetDirectory::artpark()),
            limits: QueryLimits {
                default: config.data.default_query_limit,
                max: config.data.max_query_limit,
            },
        };
        let mcp = McpServer::new(registry)
            .with_name("artpark")
            .with_context(context)
            .with_instructions(INSTRUCTIONS);
        Ok(Self { store, mcp })
    }

    /// Dataset and table counts; builds the catalogue on first use.
    pub fn counts(&self) -> (usize, usize) {
        let catalogue = self.store.catalogue();
        let tables = catalogue.datasets.values().map(|d| d.tables.len()).sum();
        (catalogue.datasets.len(), tables)
    }

    /// Build the catalogue off the async runtime so requests find it warm.
    pub async fn warm(self: &Arc<Self>) -> anyhow::Result<(usize, usize)> {
        let state = Arc::clone(self);
        Ok(tokio::task::spawn_blocking(move || state.counts()).await?)
    }
}
