//! Proxy binary: configuration resolution, listener binding, serving.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dine_proxy::config::loader::resolve_config;
use dine_proxy::lifecycle::signals;
use dine_proxy::observability::{logging, metrics};
use dine_proxy::{HttpServer, Shutdown};

#[derive(Debug, Parser)]
#[command(name = "dine-proxy", about = "Browser-impersonating food-delivery API proxy")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listening port (overrides the config file and PORT).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init("dine_proxy=debug,tower_http=debug");
    tracing::info!("dine-proxy v0.1.0 starting");

    let config = resolve_config(cli.config.as_deref(), cli.port)?;

    tracing::info!(
        port = config.listener.port,
        upstream = %config.upstream.base_url,
        handshake_attempts = config.upstream.handshake_attempts,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown));

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
