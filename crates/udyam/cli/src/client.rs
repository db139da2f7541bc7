//! HTTP client for the registration service.

use crate::error::{CliError, CliResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use udyam_engine::{StepSubmitter, SubmitError};
use udyam_types::{
    DeleteAck, ErrorBody, FormSchema, RegistrationBody, StepAccepted, StepSubmission,
};

/// HTTP client for communicating with the registration service.
pub struct RegistrationClient {
    client: Client,
    base_url: String,
}

impl RegistrationClient {
    pub fn new(endpoint: &str) -> CliResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the form schema the service renders from.
    pub async fn fetch_schema(&self) -> CliResult<FormSchema> {
        let response = self
            .client
            .get(format!("{}/api/schema", self.base_url))
            .send()
            .await?;
        Ok(response.error_for_status()?.json().await?)
    }

    /// Read a registration record.
    pub async fn get_registration(&self, id: &str) -> CliResult<RegistrationBody> {
        let response = self
            .client
            .get(format!("{}/api/registrations/{}", self.base_url, id))
            .send()
            .await?;
        self.expect_record(response).await
    }

    /// Delete a registration record.
    pub async fn delete_registration(&self, id: &str) -> CliResult<DeleteAck> {
        let response = self
            .client
            .delete(format!("{}/api/registrations/{}", self.base_url, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CliError::NotFound(format!("registration {id}")));
        }
        Ok(response.error_for_status()?.json().await?)
    }

    async fn expect_record(&self, response: reqwest::Response) -> CliResult<RegistrationBody> {
        match response.status() {
            StatusCode::NOT_FOUND => {
                let body: ErrorBody = response.json().await?;
                Err(CliError::NotFound(body.error))
            }
            status if status.is_success() => Ok(response.json().await?),
            _ => {
                let body: ErrorBody = response.json().await?;
                Err(CliError::Service(body.error))
            }
        }
    }
}

#[async_trait]
impl StepSubmitter for RegistrationClient {
    async fn submit_step(
        &self,
        submission: &StepSubmission,
    ) -> Result<StepAccepted, SubmitError> {
        let response = self
            .client
            .post(format!("{}/api/submit-step", self.base_url))
            .json(submission)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|err| SubmitError::Transport(err.to_string()))
        } else {
            // The service answered with an error envelope; surface its
            // message as a rejection, not a transport failure.
            let body: ErrorBody = response
                .json()
                .await
                .map_err(|err| SubmitError::Transport(err.to_string()))?;
            Err(SubmitError::Rejected(body.error))
        }
    }
}
