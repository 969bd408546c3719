use std::path::PathBuf;

use serde_json::{json, Value};
use thiserror::Error;

/// Hint attached to column errors, pointing the caller at the schema operation.
pub const SCHEMA_HINT: &str =
    "Call 3_get_metadata() to see valid column names and filter values.";

/// Per-call failures of the data-access layer.
///
/// None of these are fatal: callers relay [`DataError::to_payload`] back to
/// the agent so it can correct the request.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Dataset '{0}' not found.")]
    DatasetNotFound(String),

    #[error("CSV not found for dataset '{dataset}', table '{table}'.")]
    TableNotFound { dataset: String, table: String },

    #[error("Column '{column}' not found.")]
    ColumnNotFound {
        column: String,
        valid_columns: Vec<String>,
    },

    #[error("Failed to read CSV '{}': {reason}", path.display())]
    ReadFailure { path: PathBuf, reason: String },
}

impl DataError {
    pub(crate) fn read_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DataError::ReadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Structured error payload for the calling layer.
    pub fn to_payload(&self) -> Value {
        match self {
            DataError::ColumnNotFound { valid_columns, .. } => json!({
                "error": self.to_string(),
                "valid_columns": valid_columns,
                "hint": SCHEMA_HINT,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}
