//! Registration API HTTP client.

use crate::error::ConsoleError;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};

/// A registration submission as sent by the public form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub event: String,
    pub shirt_size: String,
    pub agree_to_terms: bool,
}

/// Server acknowledgement of a stored registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub id: String,
    pub event_fee: u32,
    pub status: String,
    pub message: String,
}

/// One stored registration: identifier plus opaque fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRow {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    registrations: Vec<RegistrationRow>,
    #[allow(dead_code)]
    total: usize,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

/// Registration API client.
#[derive(Clone)]
pub struct RegistrationApiClient {
    client: Client,
    base_url: String,
}

impl RegistrationApiClient {
    /// Create a new client.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConsoleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Check if the registration API is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Submit a registration.
    #[instrument(skip(self, submission))]
    pub async fn submit(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<SubmitResponse, ConsoleError> {
        let response = self
            .client
            .post(format!("{}/v1/registrations", self.base_url))
            .json(submission)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let ack: SubmitResponse = response.json().await?;
        debug!(registration_id = %ack.id, "Registration submitted");
        Ok(ack)
    }

    /// Log in as admin, returning a session token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, password: &str) -> Result<String, ConsoleError> {
        let response = self
            .client
            .post(format!("{}/v1/admin/login", self.base_url))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let login: LoginResponse = response.json().await?;
        Ok(login.token)
    }

    /// Fetch every stored registration.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> Result<Vec<RegistrationRow>, ConsoleError> {
        let response = self
            .client
            .get(format!("{}/v1/admin/registrations", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let list: ListResponse = response.json().await?;
        debug!("Fetched {} registrations", list.registrations.len());
        Ok(list.registrations)
    }

    /// Delete a single registration by identifier.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: &str) -> Result<(), ConsoleError> {
        let response = self
            .client
            .delete(format!("{}/v1/admin/registrations/{}", self.base_url, id))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!(registration_id = %id, "Registration deleted");
        Ok(())
    }
}

/// Map a non-success response to a typed error.
async fn error_from_response(response: Response) -> ConsoleError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        if parsed.code == "INCORRECT_PASSWORD" {
            return ConsoleError::IncorrectPassword;
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return ConsoleError::Permission(parsed.error);
        }
        return ConsoleError::Api(parsed.error);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ConsoleError::Permission(body);
    }
    ConsoleError::Api(body)
}
