//! HTTP client for the SEMrush Analytics API.

use super::models::{ReportOptions, ReportType, SemrushResponse, VolumeFallback};
use super::parser;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::http;
use crate::table::{Record, Table};
use async_trait::async_trait;
use tracing::{debug, info};
use wreq::Client;

const SEMRUSH_BASE: &str = "https://api.semrush.com";

/// Trait for SEMrush keyword reports - enables mocking for tests.
#[async_trait]
pub trait SemrushApi: Send + Sync {
    /// Keyword overview (`phrase_this`) as a single record.
    async fn keyword_data(
        &self,
        keyword: &str,
        options: &ReportOptions,
    ) -> Result<SemrushResponse<Record>>;

    /// Organic results (`phrase_organic`) as a table.
    async fn organic_results(
        &self,
        keyword: &str,
        options: &ReportOptions,
    ) -> Result<SemrushResponse<Table>>;

    /// Related keywords (`phrase_related`) as a table.
    async fn related_keywords(
        &self,
        keyword: &str,
        options: &ReportOptions,
    ) -> Result<SemrushResponse<Table>>;

    /// Monthly search volume for a keyword.
    async fn search_volume(
        &self,
        keyword: &str,
        options: &ReportOptions,
        fallback: VolumeFallback,
    ) -> Result<Option<u64>> {
        let response = self.keyword_data(keyword, options).await?;
        Ok(response.search_volume(fallback)?)
    }
}

/// SEMrush HTTP client.
pub struct SemrushClient {
    client: Client,
    api_key: String,
    database: String,
    base_url: String,
}

impl SemrushClient {
    /// Creates a new SEMrush client for `api_key`.
    pub fn new(api_key: impl Into<String>, config: &Config) -> Result<Self> {
        Self::with_base_url(api_key, config, SEMRUSH_BASE.to_string())
    }

    /// Creates a new SEMrush client with a custom base URL (for testing).
    pub fn with_base_url(
        api_key: impl Into<String>,
        config: &Config,
        base_url: String,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingCredentials("SEMRUSH_API_KEY"));
        }

        Ok(Self {
            client: http::build_client(config)?,
            api_key,
            database: config.semrush_database.clone(),
            base_url,
        })
    }

    /// Builds the full request URL for a report.
    fn report_url(&self, report: ReportType, keyword: &str, options: &ReportOptions) -> String {
        let database = options.database.as_deref().unwrap_or(&self.database);
        let export_columns = options.export_columns.join(",");
        let display_limit = options.display_limit.map(|l| l.to_string());

        let mut pairs = vec![
            ("key", self.api_key.as_str()),
            ("type", report.as_str()),
            ("database", database),
            ("phrase", keyword),
        ];
        if !export_columns.is_empty() {
            pairs.push(("export_columns", export_columns.as_str()));
        }
        if let Some(limit) = display_limit.as_deref() {
            pairs.push(("display_limit", limit));
        }

        format!("{}/?{}", self.base_url.trim_end_matches('/'), http::encode_query(&pairs))
    }

    /// Sends a report request and returns the raw text body.
    async fn fetch(&self, report: ReportType, keyword: &str, options: &ReportOptions) -> Result<String> {
        let url = self.report_url(report, keyword, options);

        // The URL carries the API key, so only log the report parameters.
        debug!("GET {} type={} phrase={}", self.base_url, report, keyword);

        let response = self.client.get(url.as_str()).header("Accept", "text/plain").send().await?;
        http::read_body(response).await
    }
}

#[async_trait]
impl SemrushApi for SemrushClient {
    async fn keyword_data(
        &self,
        keyword: &str,
        options: &ReportOptions,
    ) -> Result<SemrushResponse<Record>> {
        info!("Fetching keyword data: {}", keyword);
        let body = self.fetch(ReportType::PhraseThis, keyword, options).await?;
        Ok(parser::parse_record(&body)?)
    }

    async fn organic_results(
        &self,
        keyword: &str,
        options: &ReportOptions,
    ) -> Result<SemrushResponse<Table>> {
        info!("Fetching organic results: {}", keyword);
        let body = self.fetch(ReportType::PhraseOrganic, keyword, options).await?;
        Ok(parser::parse_table(&body)?)
    }

    async fn related_keywords(
        &self,
        keyword: &str,
        options: &ReportOptions,
    ) -> Result<SemrushResponse<Table>> {
        info!("Fetching related keywords: {}", keyword);
        let body = self.fetch(ReportType::PhraseRelated, keyword, options).await?;
        Ok(parser::parse_table(&body)?)
    }
}
