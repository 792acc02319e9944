//! Submission endpoints

use reqwest::header::{
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD,
    CONTENT_TYPE,
};
use reqwest::Method;
use tracing::debug;

use crate::CollectorClient;
use crate::error::{ClientError, Result};
use labkit_core::{Acknowledgement, Submission};

impl CollectorClient {
    /// Send a submission to the collector
    ///
    /// # Arguments
    /// * `submission` - Trainee name and captured cluster status
    ///
    /// # Returns
    /// The collector's acknowledgement
    pub async fn submit(&self, submission: &Submission) -> Result<Acknowledgement> {
        let url = self.endpoint();
        debug!("Posting submission for {} to {}", submission.trainee_name(), url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Issue the CORS preflight a browser would send before `submit`
    ///
    /// Fails unless the collector answers with a success status and
    /// advertises `POST` as an allowed method.
    pub async fn preflight(&self) -> Result<()> {
        let response = self
            .client
            .request(Method::OPTIONS, self.endpoint())
            .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::api_error(status.as_u16(), "preflight rejected"));
        }

        let methods = response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !methods.split(',').any(|m| m.trim() == "POST") {
            return Err(ClientError::ParseError(format!(
                "collector does not allow POST (allowed: '{}')",
                methods
            )));
        }

        Ok(())
    }
}
