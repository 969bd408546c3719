//! HTTP handlers.

mod health;
mod mcp;

pub use health::{health, health_report};
pub use mcp::mcp;
