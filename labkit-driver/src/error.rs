//! Driver error types

use labkit_core::ConfigError;
use thiserror::Error;

/// Errors that stop a driver run
#[derive(Debug, Error)]
pub enum DriverError {
    /// `config.json` exists but cannot be used
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The connectivity probe failed before anything was deployed
    #[error("Cluster is unreachable: {0}")]
    ClusterUnreachable(String),

    /// A step marked fatal exited non-zero
    #[error("Command '{command}' failed (exit code {exit_code:?}): {detail}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        detail: String,
    },

    /// Local filesystem failure (page file, lab directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Headless submission was refused or never reached the collector
    #[error("Submission failed: {0}")]
    Submission(#[from] labkit_client::ClientError),
}
