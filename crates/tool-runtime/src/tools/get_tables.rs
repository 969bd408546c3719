//! Step 2: tables and CSV inventory of one dataset.

use std::sync::Arc;

use artpark_catalog::DataStore;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{into_object, run_blocking};
use crate::tool::{optional_str, required_str, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

pub const NAME: &str = "2_get_tables";

const NEXT_STEP: &str = "Call 3_get_metadata(dataset_id, table_name) with the table that matches \
    the user's query. MUST NOT skip to 4_get_data().";

const RETRY_HINT: &str = "If none of the tables above match the user's query, you may have picked \
    the WRONG dataset. Go back to 1_know_about_artpark_data() and try a different dataset.";

pub struct GetTablesTool {
    store: Arc<DataStore>,
}

impl GetTablesTool {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetTablesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Step 2: List the tables (CSV files) of one dataset. Call \
                1_know_about_artpark_data() first and 3_get_metadata() next; never skip to \
                4_get_data(). Always pass the user's original question as user_query."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "dataset_id": {
                        "type": "string",
                        "description": "Dataset ID - one of: 0015, 0034, 0041, 0055, 0059, 0086, 0087, 0089"
                    },
                    "user_query": {
                        "type": "string",
                        "description": "The user's original question"
                    }
                },
                "required": ["dataset_id"]
            }),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let dataset_id = required_str(&input, "dataset_id")?.to_string();
        let user_query = optional_str(&input, "user_query")?.map(str::to_string);

        if !context.directory.is_known(&dataset_id) {
            let mut payload = context.directory.unknown_dataset(&dataset_id);
            payload["_user_query"] = json!(user_query);
            return Ok(ToolResult::error(payload));
        }

        debug!(dataset = %dataset_id, "listing tables");
        let store = Arc::clone(&self.store);
        let id = dataset_id.clone();
        let tables = run_blocking(move || store.get_dataset_tables(&id)).await?;

        match tables {
            Ok(tables) => {
                let mut payload = into_object(&tables)?;
                payload.insert("_user_query".into(), json!(user_query));
                payload.insert("_next_step".into(), json!(NEXT_STEP));
                payload.insert("_retry_hint".into(), json!(RETRY_HINT));
                Ok(ToolResult::success(Value::Object(payload)))
            }
            Err(e) => {
                let mut payload = e.to_payload();
                payload["_user_query"] = json!(user_query);
                Ok(ToolResult::error(payload))
            }
        }
    }
}
