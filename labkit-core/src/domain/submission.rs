//! Submission domain types

use serde::{Deserialize, Serialize};

/// Name printed when a submission does not carry a trainee name
pub const UNKNOWN_TRAINEE: &str = "Inconnu";

/// Text printed when a submission does not carry any logs
pub const NO_LOGS: &str = "Aucun log reçu";

/// A trainee's validation request
///
/// Both fields are optional on the wire; accessors fall back to the
/// placeholders above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagiaire: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

impl Submission {
    pub fn new(trainee_name: impl Into<String>, log_text: impl Into<String>) -> Self {
        Self {
            stagiaire: Some(trainee_name.into()),
            logs: Some(log_text.into()),
        }
    }

    pub fn trainee_name(&self) -> &str {
        self.stagiaire.as_deref().unwrap_or(UNKNOWN_TRAINEE)
    }

    pub fn log_text(&self) -> &str {
        self.logs.as_deref().unwrap_or(NO_LOGS)
    }
}

/// Body returned by the collector once a submission has been printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub status: String,
    pub message: String,
}

impl Acknowledgement {
    pub fn received() -> Self {
        Self {
            status: "success".to_string(),
            message: "Validation reçue".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
