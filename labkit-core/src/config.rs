//! Lab configuration
//!
//! The trainee-specific settings dropped next to the lab material by the
//! instructor: where the collector listens and who the trainee is.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a `LabConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid lab configuration: {0}")]
    Invalid(String),
}

/// Per-trainee configuration
///
/// Keys on disk follow the lab material (`formateur_ip`, `formateur_port`,
/// `stagiaire_nom`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabConfig {
    #[serde(rename = "formateur_ip")]
    pub collector_host: String,

    #[serde(rename = "formateur_port")]
    pub collector_port: u16,

    #[serde(rename = "stagiaire_nom")]
    pub trainee_name: String,
}

impl LabConfig {
    /// File name looked up in the lab directory
    pub const FILE_NAME: &'static str = "config.json";

    /// Loads the configuration from `dir`
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(Self::FILE_NAME);

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;

        Ok(Some(config))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collector_host.is_empty() {
            return Err(ConfigError::Invalid(
                "collector host cannot be empty".to_string(),
            ));
        }

        if self
            .collector_host
            .chars()
            .any(|c| c.is_whitespace() || c == '/')
        {
            return Err(ConfigError::Invalid(format!(
                "collector host '{}' must be a bare host name or address",
                self.collector_host
            )));
        }

        if self.collector_port == 0 {
            return Err(ConfigError::Invalid(
                "collector port must be greater than 0".to_string(),
            ));
        }

        if self.trainee_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "trainee name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// URL the results page posts to
    pub fn collector_url(&self) -> String {
        format!("http://{}:{}/", self.collector_host, self.collector_port)
    }
}
