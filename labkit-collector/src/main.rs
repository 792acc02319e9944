//! Labkit Collector
//!
//! Listens for trainees' validation submissions and prints them.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::IpAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labkit_collector::{CollectorSettings, config::DEFAULT_PORT, serve, shutdown_signal};

#[derive(Parser)]
#[command(name = "labkit-collector")]
#[command(about = "Receives lab validations from trainees", long_about = None)]
struct Cli {
    /// Interface to listen on
    #[arg(long, env = "COLLECTOR_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "COLLECTOR_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labkit_collector=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = CollectorSettings::new(cli.bind, cli.port);
    settings.validate()?;

    let addr = settings.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on {}", addr);
    println!("Serveur du formateur en écoute sur le port {}...", settings.port);

    serve(listener, shutdown_signal())
        .await
        .context("Collector stopped unexpectedly")?;

    println!("\nArrêt du serveur.");
    Ok(())
}
