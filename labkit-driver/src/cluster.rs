//! Cluster commands
//!
//! Every external tool invocation the driver makes is described here as a
//! typed value and turned into a program plus argument list. Nothing is ever
//! handed to a shell.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Namespace the lab workload is installed into
pub const DEFAULT_NAMESPACE: &str = "mon-application";

/// Helm release name of the lab workload
pub const DEFAULT_RELEASE: &str = "mon-app";

/// Chart directory, relative to the lab directory
pub const DEFAULT_CHART: &str = "./app-chart";

/// Chart value receiving the namespace
const NAMESPACE_VALUE: &str = "namespace";

/// Chart value receiving the rendered results page
const INDEX_HTML_VALUE: &str = "indexHtml";

/// Rejected namespace or release name
#[derive(Debug, Error)]
#[error("invalid {kind} '{value}': {reason}")]
pub struct InvalidName {
    kind: &'static str,
    value: String,
    reason: &'static str,
}

/// Checks an RFC 1123 label: what both kubectl namespaces and helm release
/// names accept.
fn validate_label(kind: &'static str, value: &str) -> Result<(), InvalidName> {
    let reject = |reason| InvalidName {
        kind,
        value: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(reject("must not be empty"));
    }

    if value.len() > 63 {
        return Err(reject("must be at most 63 characters"));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(reject(
            "must contain only lowercase letters, digits and '-'",
        ));
    }

    if value.starts_with('-') || value.ends_with('-') {
        return Err(reject("must start and end with a letter or digit"));
    }

    Ok(())
}

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = InvalidName;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                validate_label($kind, value)?;
                Ok(Self(value.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

label_type!(
    /// A validated Kubernetes namespace
    Namespace,
    "namespace"
);

label_type!(
    /// A validated helm release name
    ReleaseName,
    "release name"
);

/// A program with its argument list and optional stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Invocation {
    fn new(program: &'static str, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    fn with_stdin(mut self, stdin: String) -> Self {
        self.stdin = Some(stdin);
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The external commands the driver runs
#[derive(Debug, Clone)]
pub enum ClusterCommand {
    /// Read-only connectivity probe
    ClusterInfo,

    /// Client-side render of a namespace manifest
    RenderNamespace { namespace: Namespace },

    /// Apply a manifest read from stdin
    ApplyManifest { manifest: String },

    /// Install or upgrade the lab chart
    HelmUpgrade {
        release: ReleaseName,
        chart: String,
        namespace: Namespace,
        /// File whose content becomes the served page, relative to the
        /// working directory (helm splits `--set-file` values on ',')
        index_html: Option<PathBuf>,
    },

    GetPods { namespace: Namespace },

    GetServices { namespace: Namespace },
}

impl ClusterCommand {
    /// Program and arguments for this command
    pub fn invocation(&self) -> Invocation {
        match self {
            ClusterCommand::ClusterInfo => Invocation::new("kubectl", ["cluster-info"]),
            ClusterCommand::RenderNamespace { namespace } => Invocation::new(
                "kubectl",
                [
                    "create",
                    "namespace",
                    namespace.as_str(),
                    "--dry-run=client",
                    "-o",
                    "yaml",
                ],
            ),
            ClusterCommand::ApplyManifest { manifest } => {
                Invocation::new("kubectl", ["apply", "-f", "-"]).with_stdin(manifest.clone())
            }
            ClusterCommand::HelmUpgrade {
                release,
                chart,
                namespace,
                index_html,
            } => {
                let mut args = vec![
                    "upgrade".to_string(),
                    "--install".to_string(),
                    release.as_str().to_string(),
                    chart.clone(),
                    "-n".to_string(),
                    namespace.as_str().to_string(),
                    "--set".to_string(),
                    format!("{}={}", NAMESPACE_VALUE, namespace),
                ];

                if let Some(path) = index_html {
                    args.push("--set-file".to_string());
                    args.push(format!("{}={}", INDEX_HTML_VALUE, path.display()));
                }

                Invocation::new("helm", args)
            }
            ClusterCommand::GetPods { namespace } => {
                Invocation::new("kubectl", ["get", "pods", "-n", namespace.as_str()])
            }
            ClusterCommand::GetServices { namespace } => {
                Invocation::new("kubectl", ["get", "svc", "-n", namespace.as_str()])
            }
        }
    }
}
