//! Step 1: overview of every dataset.

use std::sync::Arc;

use artpark_catalog::DataStore;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tool::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

pub const NAME: &str = "1_know_about_artpark_data";

const WORKFLOW: &[&str] = &[
    "1. 1_know_about_artpark_data() -> find dataset (MANDATORY first step)",
    "2. 2_get_tables(dataset_id) -> list tables",
    "3. 3_get_metadata(dataset_id, table_name) -> get schema + filter values (MANDATORY before step 4)",
    "4. 4_get_data(dataset_id, table_name, filters) -> fetch data (MUST use values from step 3)",
];

const RULES: &[&str] = &[
    "MUST NOT skip 3_get_metadata() -- column names and filter values differ per table",
    "MUST NOT guess column names or filter values -- use ONLY values from 3_get_metadata()",
    "Comma-separated values work for multiple filter matches (e.g., 'Bengaluru Urban,Mysuru')",
    "ALWAYS attempt the full workflow before saying data is unavailable",
];

/// Curated dataset directory merged with live table counts.
pub struct KnowAboutTool {
    store: Arc<DataStore>,
}

impl KnowAboutTool {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for KnowAboutTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME.to_string(),
            description: "Step 1: Get an overview of the ARTPARK public health datasets \
                (dengue epidemiology, livestock census, FMD vaccination and surveillance, \
                administrative geography). MUST be called before any other tool. \
                Workflow: 1_know_about_artpark_data -> 2_get_tables -> 3_get_metadata -> 4_get_data. \
                Ask the user to clarify vague questions; fetch directly for specific ones."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn execute(&self, _input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let catalogue = self.store.catalogue();

        let datasets: serde_json::Map<String, Value> = context
            .directory
            .iter()
            .map(|(id, profile)| {
                let entry = catalogue.get(id);
                let mut value = json!({
                    "name": profile.name,
                    "category": profile.category,
                    "description": profile.description,
                    "tags": profile.tags,
                    "use_for": profile.use_for,
                    "num_tables": entry.map_or(0, |e| e.tables.len()),
                    "num_csv_files": entry.map_or(0, |e| e.csv_files.len()),
                });
                if entry.is_none() {
                    value["available"] = Value::Bool(false);
                }
                (id.clone(), value)
            })
            .collect();

        Ok(ToolResult::success(json!({
            "total_datasets": context.directory.len(),
            "source": "ARTPARK Data Science Innovation Hub (DSIH)",
            "documentation": "https://publicdata.readthedocs.io",
            "catalogue": "https://health.artpark.ai/data",
            "datasets": datasets,
            "categories": context.directory.categories(),
            "workflow": WORKFLOW,
            "rules": RULES,
            "_next_step": "Call 2_get_tables(dataset_id) with the dataset that matches the user's query.",
        })))
    }
}
