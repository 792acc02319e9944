//! Render command handler
//!
//! Produces the same page `deploy` publishes, but only reads from the
//! cluster: status queries that fail leave their section empty.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;
use crate::deployment::Deployment;
use crate::page::{self, PageContext};
use crate::runner::{CommandRunner, OnFailure, SystemRunner};

/// Render the results page to `output`
pub fn handle_render(config: &Config, output: &Path) -> Result<()> {
    let runner = SystemRunner::new(config.lab_dir.clone());
    render_with(&runner, config, output)?;
    Ok(())
}

/// Render through `runner`
///
/// # Returns
/// `false` when there was no `config.json` and nothing was written
fn render_with<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
    output: &Path,
) -> Result<bool> {
    let deployment = Deployment::new(runner, config);

    let Some(lab) = deployment.load_lab_config()? else {
        return Ok(false);
    };

    let status = deployment.capture_status(OnFailure::Continue)?;
    let collector_url = lab.collector_url();
    let html = page::render(&PageContext {
        title: page::DEFAULT_TITLE,
        trainee_name: &lab.trainee_name,
        cluster_status: &status,
        collector_url: &collector_url,
    });

    fs::write(output, html)
        .with_context(|| format!("Failed to write page to {:?}", output))?;

    println!(
        "{} {}",
        "Page écrite dans".green(),
        output.display().to_string().cyan()
    );

    Ok(true)
}
