//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MCP server for the ARTPARK public health datasets.
///
/// Settings come from the environment (and `.env`); flags given here win.
#[derive(Parser, Debug)]
#[command(name = "artpark-server", version, about = "ARTPARK public data MCP server")]
pub struct CliArgs {
    /// Dataset root directory (one subdirectory per dataset); overrides
    /// the profiled `DATA_DIR` setting
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve MCP over stdin/stdout
    Stdio,
    /// Serve MCP over HTTP (POST /mcp) with a health endpoint
    Http {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the health report as JSON and exit
    Health,
}

impl CliArgs {
    /// Fold command-line overrides into the loaded config.
    pub fn apply(&self, config: &mut artpark_core::Config) {
        if let Some(dir) = &self.data_dir {
            config.data.data_dir = dir.clone();
        }
        if let Command::Http { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}
