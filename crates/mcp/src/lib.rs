//! MCP (Model Context Protocol) front end for the ARTPARK data tools.
//!
//! This crate implements the MCP protocol over JSON-RPC 2.0 so that LLM
//! agents can call the tools of an `artpark-tool-runtime` registry.
//!
//! # Architecture
//!
//! - **types**: JSON-RPC 2.0 and MCP-specific protocol types
//! - **transport**: Newline-delimited transports (stdio, in-memory channels)
//! - **server**: MCP server wrapping a `ToolRegistry`
//! - **error**: Unified error types
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use artpark_catalog::DataStore;
//! use artpark_mcp::{McpServer, StdioTransport};
//! use artpark_tool_runtime::artpark_registry;
//!
//! # async fn example() {
//! let store = Arc::new(DataStore::new("publicdata/data"));
//! let server = McpServer::new(artpark_registry(store).unwrap());
//! let mut transport = StdioTransport::stdio();
//! server.run(&mut transport).await.unwrap();
//! # }
//! ```

pub mod error;
pub mod server;
pub mod transport;
pub mod types;

pub use error::McpError;
pub use server::McpServer;
pub use transport::{ChannelTransport, LineTransport, McpTransport, StdioTransport};
pub use types::*;
