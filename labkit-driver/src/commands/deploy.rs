//! Deploy command handler

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::deployment::{DeployOptions, Deployment};
use crate::runner::SystemRunner;

/// Run the full lab deployment
pub async fn handle_deploy(config: &Config, strict: bool, settle_secs: u64) -> Result<()> {
    let runner = SystemRunner::new(config.lab_dir.clone());
    let options = DeployOptions {
        strict,
        settle_delay: Duration::from_secs(settle_secs),
    };

    Deployment::new(&runner, config)
        .run(&options)
        .await
        .context("Lab deployment failed")?;

    Ok(())
}
