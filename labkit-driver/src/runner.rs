//! Command execution
//!
//! Runs cluster commands as plain argument lists and applies the per-step
//! failure policy: abort the whole run, or keep going with whatever the
//! command printed.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use colored::*;
use tracing::{debug, error, warn};

use crate::cluster::{ClusterCommand, Invocation};
use crate::error::DriverError;

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal or never started
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }

    pub(crate) fn spawn_failure(err: &io::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: err.to_string(),
            exit_code: None,
        }
    }
}

/// What to do when a command exits non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Stop the run
    Abort,
    /// Report the error and continue with the partial output
    Continue,
}

/// Something that can run an `Invocation` to completion
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

/// Runs commands on the local machine
pub struct SystemRunner {
    working_dir: PathBuf,
}

impl SystemRunner {
    /// # Arguments
    /// * `working_dir` - Directory relative paths (chart, page file) resolve against
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        let mut command = Command::new(invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&self.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if invocation.stdin.is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::null());
        }

        let mut child = command.spawn()?;

        if let Some(input) = &invocation.stdin {
            // Best effort: a child that exits without reading its input still
            // has an exit code and stderr worth reporting. Dropping the handle
            // closes the pipe so the child sees EOF.
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(e) = stdin.write_all(input.as_bytes()) {
                    debug!(
                        "{} closed stdin before reading all input: {}",
                        invocation.program, e
                    );
                }
            }
        }

        // No timeout: a hung tool hangs the driver.
        let output = child.wait_with_output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !stderr.trim().is_empty() {
            debug!("{} stderr: {}", invocation.program, stderr.trim());
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code: output.status.code(),
        })
    }
}

/// Run a cluster command and apply the failure policy
///
/// # Returns
/// The command's stdout. Under `OnFailure::Continue` a failed command still
/// yields whatever it printed, possibly nothing.
pub fn execute<R: CommandRunner + ?Sized>(
    runner: &R,
    command: &ClusterCommand,
    on_failure: OnFailure,
) -> Result<String, DriverError> {
    let invocation = command.invocation();
    println!("{} {}", "Exécution :".dimmed(), invocation);

    let output = runner.run(&invocation).unwrap_or_else(|e| {
        error!("Failed to start {}: {}", invocation.program, e);
        CommandOutput::spawn_failure(&e)
    });

    if output.success() {
        debug!(
            "{} succeeded: stdout_len={}",
            invocation,
            output.stdout.len()
        );
        return Ok(output.stdout);
    }

    let detail = if output.stderr.trim().is_empty() {
        output.combined()
    } else {
        output.stderr.clone()
    };
    println!("{} {}", "Erreur :".red().bold(), detail.trim_end());

    match on_failure {
        OnFailure::Abort => Err(DriverError::CommandFailed {
            command: invocation.to_string(),
            exit_code: output.exit_code,
            detail: detail.trim().to_string(),
        }),
        OnFailure::Continue => {
            warn!(
                "{} failed with exit code {:?}, continuing",
                invocation, output.exit_code
            );
            Ok(output.stdout)
        }
    }
}
