mod api;
mod cli;
mod router;
mod startup;
mod state;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use artpark_mcp::StdioTransport;

use crate::cli::{CliArgs, Command};
use crate::state::AppState;

fn load_config(args: &CliArgs) -> artpark_core::Config {
    artpark_core::config::load_dotenv();
    let mut config = artpark_core::Config::from_env();
    args.apply(&mut config);
    config
}

async fn serve_stdio(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut transport = StdioTransport::stdio();
    state.mcp.run(&mut transport).await?;
    Ok(())
}

async fn serve_http(state: Arc<AppState>, config: &artpark_core::Config) -> anyhow::Result<()> {
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, router::build_router(state)).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the stdio transport; logs always go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = load_config(&args);
    config.log_summary();

    let state = Arc::new(AppState::new(&config)?);
    let (datasets, tables) = state.warm().await?;

    match args.command {
        Command::Health => {
            let report = api::health_report(&state);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Stdio => {
            startup::log_banner(datasets, tables, state.mcp.tool_count(), None);
            serve_stdio(state).await?;
        }
        Command::Http { .. } => {
            let addr = config.server.bind_addr();
            startup::log_banner(datasets, tables, state.mcp.tool_count(), Some(&addr));
            serve_http(state, &config).await?;
        }
    }

    Ok(())
}
