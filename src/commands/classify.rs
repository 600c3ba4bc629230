//! Classify command implementation.

use crate::classifier::{ClassifierClient, Classify};
use crate::config::Config;
use crate::format::Formatter;
use crate::table::Record;
use anyhow::{Context, Result};
use tracing::info;

/// Classifies a URL and formats the category.
pub struct ClassifyCommand {
    config: Config,
}

impl ClassifyCommand {
    /// Creates a new classify command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the classification and returns formatted output.
    pub async fn execute(&self, url: &str, title: &str, snippet: &str) -> Result<String> {
        let api_key = self.config.classifier_api_key()?;
        let client =
            ClassifierClient::new(api_key, &self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, url, title, snippet).await
    }

    /// Executes the classification with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl Classify,
        url: &str,
        title: &str,
        snippet: &str,
    ) -> Result<String> {
        let classification = client.classify(url, title, snippet).await?;
        info!("{} classified as {}", classification.url, classification.category);

        let mut record = Record::new();
        record.insert("url", classification.url);
        record.insert("category", classification.category);
        Ok(Formatter::new(self.config.format).format_record(&record))
    }
}
