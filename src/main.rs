//! Bookie API Server Binary
//!
//! Serves the peer-to-peer wager ledger over HTTP.

use bookie::api::ApiServer;
use bookie::config::ConfigLoader;
use bookie::services::Sportsbook;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bookie")]
#[command(about = "Peer-to-peer sports wager ledger", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// API server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// API server port (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;

    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.monitoring.log_filter)),
        )
        .init();

    info!(
        allow_self_accept = config.ledger.allow_self_accept,
        push_policy = ?config.ledger.push_policy,
        "starting bookie"
    );

    let book = Sportsbook::new(&config.ledger);
    ApiServer::new(config.api, book).run().await
}
