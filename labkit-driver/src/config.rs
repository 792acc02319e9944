//! Configuration module
//!
//! Where the lab material lives and what gets deployed. Trainee-specific
//! settings come from `config.json` (see `labkit_core::LabConfig`).

use std::path::{Path, PathBuf};

use crate::cluster::{Namespace, ReleaseName};
use crate::error::DriverError;

/// Driver configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `config.json` and the chart; commands run from here
    pub lab_dir: PathBuf,

    /// Namespace the workload is installed into
    pub namespace: Namespace,

    /// Helm release name
    pub release: ReleaseName,

    /// Chart reference, relative to `lab_dir`
    pub chart: String,
}

/// Resolve the lab directory
///
/// An explicit directory wins; otherwise the directory containing the
/// `labkit` executable is used, so the driver behaves the same whatever the
/// caller's current directory is.
pub fn resolve_lab_dir(explicit: Option<&Path>) -> Result<PathBuf, DriverError> {
    let dir = match explicit {
        Some(dir) => std::path::absolute(dir)?,
        None => {
            let exe = std::env::current_exe()?;
            exe.parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{} has no parent directory", exe.display()),
                    )
                })?
        }
    };

    if !dir.is_dir() {
        return Err(DriverError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("lab directory {} does not exist", dir.display()),
        )));
    }

    Ok(dir)
}
