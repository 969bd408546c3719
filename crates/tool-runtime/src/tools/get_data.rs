//! Step 4: filtered rows and summary statistics.

use std::sync::Arc;

use artpark_catalog::{DataStore, FilterSet, QueryRequest};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{into_object, run_blocking};
use crate::tool::{required_str, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

pub const NAME: &str = "4_get_data";

const EMPTY_RESULT_HINT: &str = "No data for this filter combination. Try these fixes: \
    1) Check spelling of filter values against 3_get_metadata() output. \
    2) Remove optional filters one at a time. \
    3) The breakdown you need may already appear in the response without that filter.";

pub struct GetDataTool {
    store: Arc<DataStore>,
}

impl GetDataTool {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetDataTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Step 4: Fetch rows from a table. Only call after 3_get_metadata() and use \
                only its column names and filter values; ARTPARK column names use dot notation \
                (e.g., \"location.admin2.name\") and differ per table. Comma-separated filter \
                values match any of the listed values."
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
                        "description": "Table name (e.g., \"ka-dengue-daily-summary\")"
                    },
                    "filters": {
                        "type": "object",
                        "description": "Column-value pairs, e.g. {\"location.admin2.name\": \"Bengaluru Urban\", \"metadata.ISOWeek\": \"2023-W01\"}",
                        "additionalProperties": {
                            "type": ["string", "number", "boolean"]
                        }
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Max rows to return (default 50)"
                    }
                },
                "required": ["dataset_id", "table_name"]
            }),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let dataset_id = required_str(&input, "dataset_id")?;
        let table_name = required_str(&input, "table_name")?;

        if !context.directory.is_known(dataset_id) {
            return Ok(ToolResult::error(context.directory.unknown_dataset(dataset_id)));
        }

        let request = QueryRequest {
            dataset_id: dataset_id.to_string(),
            table_name: table_name.to_string(),
            filters: parse_filters(input.get("filters"))?,
            limit: context.limits.clamp(parse_limit(input.get("limit"))?),
        };
        debug!(
            dataset = %request.dataset_id,
            table = %request.table_name,
            filters = request.filters.len(),
            limit = request.limit,
            "querying table"
        );

        let store = Arc::clone(&self.store);
        let result = run_blocking(move || store.query_table(&request)).await?;

        match result {
            Ok(result) => {
                let mut payload = into_object(&result)?;
                if result.total_rows_after_filter == 0 {
                    payload.insert("_hint".into(), json!(EMPTY_RESULT_HINT));
                }
                Ok(ToolResult::success(Value::Object(payload)))
            }
            Err(e) => Ok(ToolResult::error(e.to_payload())),
        }
    }
}

/// Filter object -> [`FilterSet`]; numbers and booleans use their text form.
fn parse_filters(value: Option<&Value>) -> Result<FilterSet, ToolError> {
    let map = match value {
        None | Some(Value::Null) => return Ok(FilterSet::default()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(ToolError::InvalidInput("'filters' must be an object".to_string())),
    };

    let mut filters = FilterSet::default();
    for (column, value) in map {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                return Err(ToolError::InvalidInput(format!(
                    "filter value for '{column}' must be a string, number or boolean"
                )))
            }
        };
        filters.push(column.clone(), text);
    }
    Ok(filters)
}

fn parse_limit(value: Option<&Value>) -> Result<Option<usize>, ToolError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(usize::try_from(n).unwrap_or(usize::MAX)))
            .ok_or_else(|| ToolError::InvalidInput("'limit' must be a non-negative integer".to_string())),
    }
}
