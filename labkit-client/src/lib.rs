//! Labkit HTTP Client
//!
//! A small, typed client for the instructor's collector.
//!
//! The results page posts submissions from the trainee's browser; this crate
//! does the same from Rust, for headless submissions and for tests.
//!
//! # Example
//!
//! ```no_run
//! use labkit_client::CollectorClient;
//! use labkit_core::Submission;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), labkit_client::ClientError> {
//!     let client = CollectorClient::new("http://192.168.1.10:8080");
//!     let ack = client.submit(&Submission::new("Alice", "--- PODS ---\n")).await?;
//!     println!("{}", ack.message);
//!     Ok(())
//! }
//! ```

pub mod error;
mod submissions;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the collector
#[derive(Debug, Clone)]
pub struct CollectorClient {
    /// Base URL of the collector (e.g., "http://192.168.1.10:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl CollectorClient {
    /// Create a new collector client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the collector (e.g., "http://192.168.1.10:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new collector client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the collector
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the single endpoint the collector serves
    fn endpoint(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// Handle a collector response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
