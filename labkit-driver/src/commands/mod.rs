//! Commands module
//!
//! Defines the CLI commands and their handlers.

mod deploy;
mod render;
mod submit;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;
use crate::deployment::DEFAULT_SETTLE_DELAY;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Deploy the lab workload and publish the results page (default)
    Deploy {
        /// Abort when a status query fails instead of publishing partial output
        #[arg(long)]
        strict: bool,

        /// Seconds to wait after the first install before querying status
        #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY.as_secs())]
        settle_secs: u64,
    },
    /// Write the results page to a local file without deploying anything
    Render {
        /// Output file
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,
    },
    /// Send the current cluster status straight to the collector
    Submit,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Deploy {
            strict: false,
            settle_secs: DEFAULT_SETTLE_DELAY.as_secs(),
        }
    }
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The driver configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Deploy {
            strict,
            settle_secs,
        } => deploy::handle_deploy(config, strict, settle_secs).await,
        Commands::Render { output } => render::handle_render(config, &output),
        Commands::Submit => submit::handle_submit(config).await,
    }
}
