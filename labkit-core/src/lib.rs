//! Labkit Core
//!
//! Shared records for the lab tooling.
//!
//! This crate contains:
//! - Domain types: the submission a trainee sends and the collector's acknowledgement
//! - Configuration: the per-trainee `LabConfig` read by the deployment driver

pub mod config;
pub mod domain;

pub use config::{ConfigError, LabConfig};
pub use domain::submission::{Acknowledgement, Submission};
