pub mod config;

pub use config::{Config, DataConfig, ServerConfig};
