//! Submit command handler
//!
//! Headless counterpart of the page's button: captures the cluster status
//! and posts it to the collector from the terminal.

use anyhow::Result;
use colored::*;
use labkit_client::CollectorClient;
use labkit_core::{Acknowledgement, Submission};

use crate::config::Config;
use crate::deployment::Deployment;
use crate::error::DriverError;
use crate::runner::{CommandRunner, OnFailure, SystemRunner};

/// Capture the status and send it to the collector
pub async fn handle_submit(config: &Config) -> Result<()> {
    let runner = SystemRunner::new(config.lab_dir.clone());

    if let Some(ack) = submit_with(&runner, config).await? {
        println!("{} {}", "Succès !".green().bold(), ack.message);
    }

    Ok(())
}

/// Capture through `runner` and post to the collector named in `config.json`
///
/// # Returns
/// `None` when there was no `config.json` and nothing was sent
async fn submit_with<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
) -> Result<Option<Acknowledgement>, DriverError> {
    let deployment = Deployment::new(runner, config);

    let Some(lab) = deployment.load_lab_config()? else {
        return Ok(None);
    };

    let status = deployment.capture_status(OnFailure::Continue)?;
    let client = CollectorClient::new(lab.collector_url());

    println!(
        "Envoi des résultats à {}...",
        client.base_url().to_string().cyan()
    );

    let ack = client
        .submit(&Submission::new(lab.trainee_name.clone(), status))
        .await?;

    Ok(Some(ack))
}
