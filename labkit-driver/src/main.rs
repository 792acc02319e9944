//! Labkit Driver
//!
//! Deploys the lab workload on the trainee's local cluster, captures its
//! status and publishes a results page the trainee uses to submit their work.

mod cluster;
mod commands;
mod config;
mod console;
mod deployment;
mod error;
mod page;
mod runner;
#[cfg(test)]
mod testing;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cluster::{DEFAULT_CHART, DEFAULT_NAMESPACE, DEFAULT_RELEASE, Namespace, ReleaseName};
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "labkit")]
#[command(about = "Kubernetes lab deployment driver", long_about = None)]
struct Cli {
    /// Directory holding config.json and the chart (defaults to the executable's directory)
    #[arg(long, env = "LAB_DIR", global = true)]
    lab_dir: Option<PathBuf>,

    /// Namespace to deploy into
    #[arg(long, default_value = DEFAULT_NAMESPACE, global = true)]
    namespace: Namespace,

    /// Helm release name
    #[arg(long, default_value = DEFAULT_RELEASE, global = true)]
    release: ReleaseName,

    /// Chart reference, relative to the lab directory
    #[arg(long, default_value = DEFAULT_CHART, global = true)]
    chart: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labkit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        lab_dir: config::resolve_lab_dir(cli.lab_dir.as_deref())?,
        namespace: cli.namespace,
        release: cli.release,
        chart: cli.chart,
    };

    handle_command(cli.command.unwrap_or_default(), &config).await
}
