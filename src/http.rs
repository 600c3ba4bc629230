//! Shared HTTP plumbing for the provider clients.

use crate::config::Config;
use crate::error::{ApiError, Result};
use std::time::Duration;
use tracing::{debug, warn};
use wreq::{Client, Response};

/// Connect timeout applied to every client.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds an HTTP client honouring the configured timeout and proxy.
pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .gzip(true)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));

    if let Some(proxy_url) = &config.proxy {
        debug!("Configuring proxy: {}", proxy_url);
        builder = builder.proxy(wreq::Proxy::all(proxy_url)?);
    }

    Ok(builder.build()?)
}

/// Reads the body of a response, surfacing non-2xx statuses with their raw body.
pub async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    debug!("Response status: {}", status);

    let body = response.text().await?;

    if !status.is_success() {
        warn!("Request failed with status {}", status);
        return Err(ApiError::Http { status: status.as_u16(), body });
    }

    Ok(body)
}

/// Encodes `name=value` pairs into a query string.
pub fn encode_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
