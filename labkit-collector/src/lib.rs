//! Labkit Collector
//!
//! The instructor-side listener. Trainees' results pages post their
//! validation here; each submission is printed to the operator console and
//! acknowledged. Nothing is stored.

pub mod api;
pub mod config;
pub mod report;
pub mod server;

pub use api::create_router;
pub use config::CollectorSettings;
pub use server::{serve, shutdown_signal};
