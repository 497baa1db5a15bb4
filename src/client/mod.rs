//! Client for the remote generation service.
//!
//! Thin request/response wrapper around the service's two operations. No retry
//! and no request timeout live here; a failed call surfaces its error and the
//! session controller decides what happens next.

mod types;

pub use types::{GenerationRequest, GenerationResult, Style, UnknownStyle};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ServiceConfig;

/// Shown when the service fails without a parseable error body.
pub const GENERIC_FAILURE: &str = "Failed to generate website";

/// Errors surfaced by the generation client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status. The message is the
    /// structured `detail` from the error body when present.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The request never produced a response (connect failure, broken body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Seam between the session controller and the remote service.
///
/// The controller only ever talks to this trait; tests script it, production
/// wires in [`GenerationClient`].
#[async_trait]
pub trait GenerateService: Send + Sync {
    /// `POST /generate` with a prompt and style.
    async fn generate_custom(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, ClientError>;

    /// `GET /random`, no request body.
    async fn generate_random(&self) -> Result<GenerationResult, ClientError>;
}

/// Structured error body the service returns on non-success statuses.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    detail: String,
}

pub struct GenerationClient {
    http: Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(config: &ServiceConfig) -> Self {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .expect("Failed to build generation client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn decode(response: reqwest::Response) -> Result<GenerationResult, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ServiceErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
            return Err(ClientError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<GenerationResult>().await?)
    }
}

#[async_trait]
impl GenerateService for GenerationClient {
    async fn generate_custom(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, ClientError> {
        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn generate_random(&self) -> Result<GenerationResult, ClientError> {
        let response = self
            .http
            .get(format!("{}/random", self.base_url))
            .send()
            .await?;

        Self::decode(response).await
    }
}
