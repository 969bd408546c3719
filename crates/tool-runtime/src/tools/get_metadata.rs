//! Step 3: data dictionary, CSV summary and filter values of one table.

use std::sync::Arc;

use artpark_catalog::DataStore;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{into_object, run_blocking};
use crate::tool::{required_str, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

pub const NAME: &str = "3_get_metadata";

const NEXT_STEP: &str = "Call 4_get_data(dataset_id, table_name, filters) using ONLY the column \
    names and filter_values returned above. MUST NOT guess any values.";

pub struct GetMetadataTool {
    store: Arc<DataStore>,
}

impl GetMetadataTool {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetMetadataTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Step 3: Get the data dictionary, CSV summary (rows, columns, types) and \
                filter values (districts, states, years, ...) of a table. MUST be called before \
                4_get_data(); use only the column names and filter_values returned here."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "dataset_id": {
                        "type": "string",
                        "description": "Dataset ID (e.g., \"0015\", \"0041\")"
                    },
                    "table_name": {
                        "type": "string",
                        "description": "Table name from 2_get_tables (e.g., \"ka-dengue-daily-summary\")"
                    }
                },
                "required": ["dataset_id", "table_name"]
            }),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let dataset_id = required_str(&input, "dataset_id")?.to_string();
        let table_name = required_str(&input, "table_name")?.to_string();

        if !context.directory.is_known(&dataset_id) {
            return Ok(ToolResult::error(context.directory.unknown_dataset(&dataset_id)));
        }

        debug!(dataset = %dataset_id, table = %table_name, "reading table schema");
        let store = Arc::clone(&self.store);
        let schema = run_blocking(move || store.get_table_schema(&dataset_id, &table_name)).await?;

        match schema {
            Ok(schema) => {
                let mut payload = into_object(&schema)?;
                payload.insert("_next_step".into(), json!(NEXT_STEP));
                Ok(ToolResult::success(Value::Object(payload)))
            }
            Err(e) => Ok(ToolResult::error(e.to_payload())),
        }
    }
}
