//! HTTP client for the URL classifier endpoint.

use super::payload::{encode_payload, parse_category, Classification};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::http;
use async_trait::async_trait;
use tracing::{debug, info};
use wreq::Client;

const CLASSIFIER_URL: &str =
    "https://mvzktxazpd.execute-api.us-east-1.amazonaws.com/prod/classifiers/url/v3";

/// Trait for URL classification - enables mocking for tests.
#[async_trait]
pub trait Classify: Send + Sync {
    /// Returns the category label for a URL.
    async fn classify(&self, url: &str, title: &str, snippet: &str) -> Result<Classification>;
}

/// Classifier HTTP client.
pub struct ClassifierClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ClassifierClient {
    /// Creates a new classifier client for `api_key`.
    pub fn new(api_key: impl Into<String>, config: &Config) -> Result<Self> {
        Self::with_endpoint(api_key, config, CLASSIFIER_URL.to_string())
    }

    /// Creates a new classifier client posting to a custom endpoint (for testing).
    pub fn with_endpoint(
        api_key: impl Into<String>,
        config: &Config,
        endpoint: String,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingCredentials("CLASSIFIER_API_KEY"));
        }

        Ok(Self { client: http::build_client(config)?, api_key, endpoint })
    }
}

#[async_trait]
impl Classify for ClassifierClient {
    async fn classify(&self, url: &str, title: &str, snippet: &str) -> Result<Classification> {
        info!("Classifying: {}", url);

        let payload = encode_payload(url, title, snippet);
        debug!("POST {} ({} bytes)", self.endpoint, payload.len());

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header("Content-Type", "text/csv")
            .header("x-api-key", self.api_key.as_str())
            .body(payload)
            .send()
            .await?;

        let body = http::read_body(response).await?;
        let category = parse_category(&body);
        debug!("Category for {}: {}", url, category);

        Ok(Classification { url: url.to_string(), category })
    }
}
