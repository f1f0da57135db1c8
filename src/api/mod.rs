// Blog generation backend client

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::error::GenerateError;
use crate::models::{BackendHealth, ErrorBody, GenerationRequest, GenerationResponse};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
    client: Client,
}

impl BlogClient {
    /// Without a timeout a stalled backend keeps the request pending.
    pub fn new(base_url: String, request_timeout: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    #[allow(dead_code)]
    pub fn with_default_url() -> Result<Self> {
        Self::new(DEFAULT_API_URL.to_string(), None)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate_blog(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<GenerationResponse, GenerateError> {
        let url = format!("{}/generate-blog", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(GenerateError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(GenerateError::Server {
                status: status.as_u16(),
                detail: body.message(),
            });
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(GenerateError::transport)
    }

    pub async fn health_check(&self) -> Result<BackendHealth> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .context("Failed to send health request")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Health check failed: {status}");
        }

        response
            .json::<BackendHealth>()
            .await
            .context("Failed to parse health response")
    }
}
