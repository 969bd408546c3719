use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::directory::DatasetDirectory;

/// Describes a tool's interface for agent consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name (e.g., "2_get_tables")
    pub name: String,
    /// Usage instructions shown to the agent
    pub description: String,
    /// JSON Schema describing the expected input
    pub input_schema: Value,
}

/// Result of executing a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Structured payload returned to the agent
    pub content: Value,
    /// Whether the payload describes an error
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }
}

/// Row limits applied to data queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Used when the caller gives no limit.
    pub default: usize,
    /// Caller-supplied limits are clamped to this.
    pub max: usize,
}

impl QueryLimits {
    pub fn clamp(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default).min(self.max)
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default: 50,
            max: 10_000,
        }
    }
}

/// Context passed to tool execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Curated datasets; also the allow-list of dataset ids.
    pub directory: Arc<DatasetDirectory>,
    pub limits: QueryLimits,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self {
            directory: Arc::new(DatasetDirectory::artpark()),
            limits: QueryLimits::default(),
        }
    }
}

/// The primary extension point: all tools implement this trait.
///
/// Tools are object-safe, Send + Sync, and async.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, JSON Schema).
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON input.
    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl fmt::Display for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.description)
    }
}

/// Required string argument.
pub(crate) fn required_str<'a>(input: &'a Value, field: &str) -> Result<&'a str, ToolError> {
    input
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidInput(format!("missing '{field}' field")))
}

/// Optional string argument; `null` counts as absent.
pub(crate) fn optional_str<'a>(input: &'a Value, field: &str) -> Result<Option<&'a str>, ToolError> {
    match input.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ToolError::InvalidInput(format!("'{field}' must be a string"))),
    }
}
