#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use gcloud_mcp::api::ApiClients;
use gcloud_mcp::cli::{Cli, Commands};
use gcloud_mcp::policy::{AllowMatcher, CommandPolicy, DenyMatcher};
use gcloud_mcp::{Config, gcloud, install, mcp};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol; all diagnostics go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    match cli.command {
        None => {
            let config = match &cli.config {
                Some(path) => Config::load(path)?,
                None => Config::default(),
            };
            let policy = CommandPolicy::new(
                AllowMatcher::new(config.allowlist()),
                DenyMatcher::new(config.merged_denylist()),
            );
            require_gcloud().await;
            tracing::info!("starting gcloud MCP server on stdio");
            mcp::gcloud_server::serve_stdio(policy).await
        }
        Some(Commands::Observability) => {
            require_gcloud().await;
            tracing::info!("starting observability MCP server on stdio");
            mcp::observability_server::serve_stdio(ApiClients::new()).await
        }
        Some(Commands::Init { agent, local }) => {
            let cwd = std::env::current_dir()?;
            let created = install::run(&agent, local, &cwd)?;
            for path in created {
                println!("Created: {}", path.display());
            }
            println!("gcloud-mcp extension initialized.");
            Ok(())
        }
    }
}

fn log_level() -> Level {
    let level = std::env::var("LOG_LEVEL").unwrap_or_default();
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

async fn require_gcloud() {
    if !gcloud::is_available().await {
        eprintln!(
            "gcloud CLI not found on PATH. Install the Google Cloud SDK: \
             https://cloud.google.com/sdk/docs/install"
        );
        std::process::exit(1);
    }
}
