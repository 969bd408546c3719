//! Tool layer over the ARTPARK data store.
//!
//! Tools implement [`Tool`] and live in a [`ToolRegistry`]; the four data
//! tools in [`tools`] walk an agent from dataset discovery to filtered rows.

pub mod directory;
pub mod registry;
pub mod tool;
pub mod tools;

pub use directory::{DatasetDirectory, DatasetProfile};
pub use registry::{RegistryError, ToolRegistry};
pub use tool::{QueryLimits, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
pub use tools::{artpark_registry, GetDataTool, GetMetadataTool, GetTablesTool, KnowAboutTool};
