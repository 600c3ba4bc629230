//! SEMrush command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::semrush::{ReportOptions, SemrushApi, SemrushClient, SemrushResponse};
use crate::table::Record;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Which keyword report to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordReport {
    /// Keyword overview as a single record
    Overview,
    /// Search volume only
    Volume,
    /// Organic results table
    Organic,
    /// Related keywords table
    Related,
}

/// Runs SEMrush keyword reports and formats the results.
pub struct SemrushCommand {
    config: Config,
    export_columns: Vec<String>,
}

impl SemrushCommand {
    /// Creates a new SEMrush command.
    pub fn new(config: Config) -> Self {
        Self { config, export_columns: Vec::new() }
    }

    /// Restricts the report to the given SEMrush column codes.
    pub fn with_export_columns(mut self, columns: Vec<String>) -> Self {
        self.export_columns = columns;
        self
    }

    fn options(&self) -> ReportOptions {
        let mut options = ReportOptions::new()
            .database(self.config.semrush_database.clone())
            .export_columns(self.export_columns.iter().cloned());
        options.display_limit = self.config.display_limit;
        options
    }

    /// Executes a report and returns formatted output.
    pub async fn execute(&self, report: KeywordReport, keyword: &str) -> Result<String> {
        let api_key = self.config.semrush_api_key()?;
        let client =
            SemrushClient::new(api_key, &self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, report, keyword).await
    }

    /// Executes a report with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl SemrushApi,
        report: KeywordReport,
        keyword: &str,
    ) -> Result<String> {
        info!("Running {:?} report for: {}", report, keyword);

        let formatter = Formatter::new(self.config.format);
        let options = self.options();

        let output = match report {
            KeywordReport::Overview => {
                let response = client.keyword_data(keyword, &options).await?;
                warn_on_error(&response);
                formatter.format_record(&response.into_record())
            }
            KeywordReport::Volume => {
                let volume = client
                    .search_volume(keyword, &options, self.config.volume_fallback)
                    .await?;

                let mut record = Record::new();
                record.insert("Keyword", keyword);
                record.insert("Search Volume", volume.map(|v| v.to_string()).unwrap_or_default());
                formatter.format_record(&record)
            }
            KeywordReport::Organic => {
                let response = client.organic_results(keyword, &options).await?;
                warn_on_error(&response);
                formatter.format_table(&response.into_table())
            }
            KeywordReport::Related => {
                let response = client.related_keywords(keyword, &options).await?;
                warn_on_error(&response);
                formatter.format_table(&response.into_table())
            }
        };

        Ok(output)
    }
}

fn warn_on_error<T>(response: &SemrushResponse<T>) {
    if let Some(error) = response.error() {
        warn!("SEMrush reported an error: {}", error);
    }
}
