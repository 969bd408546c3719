//! The four ARTPARK data tools, meant to be called in order:
//!
//! 1. `1_know_about_artpark_data` -> pick a dataset
//! 2. `2_get_tables` -> pick a table
//! 3. `3_get_metadata` -> learn column names and filter values
//! 4. `4_get_data` -> fetch filtered rows

pub mod get_data;
pub mod get_metadata;
pub mod get_tables;
pub mod know_about;

pub use get_data::GetDataTool;
pub use get_metadata::GetMetadataTool;
pub use get_tables::GetTablesTool;
pub use know_about::KnowAboutTool;

use std::sync::Arc;

use artpark_catalog::DataStore;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::registry::{RegistryError, ToolRegistry};
use crate::tool::ToolError;

/// Registry holding all four data tools over one store.
pub fn artpark_registry(store: Arc<DataStore>) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(KnowAboutTool::new(Arc::clone(&store)))?;
    registry.register(GetTablesTool::new(Arc::clone(&store)))?;
    registry.register(GetMetadataTool::new(Arc::clone(&store)))?;
    registry.register(GetDataTool::new(store))?;
    Ok(registry)
}

/// Serialize a core result into a JSON object that guidance keys can be added to.
fn into_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, ToolError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ToolError::ExecutionFailed(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(e) => Err(ToolError::ExecutionFailed(e.to_string())),
    }
}

/// Run a synchronous data-layer call on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, ToolError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ToolError::ExecutionFailed(format!("data task failed: {e}")))
}
