//! Moz command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::moz::{MozApi, MozClient, MozParams};
use crate::table::Record;
use crate::targets::TargetList;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Which Moz report to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MozReport {
    UrlMetrics,
    LinkingRootDomains,
}

/// Runs Moz lookups and formats the results.
pub struct MozCommand {
    config: Config,
}

impl MozCommand {
    /// Creates a new Moz command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<MozClient> {
        let credentials = self.config.moz_credentials()?;
        MozClient::new(&credentials, &self.config).context("Failed to create HTTP client")
    }

    /// Executes a report and returns formatted output.
    pub async fn execute(
        &self,
        report: MozReport,
        targets: &TargetList,
        params: &MozParams,
    ) -> Result<String> {
        // Reject bad input before credentials are even looked at.
        targets.ensure_not_empty()?;
        let client = self.client()?;
        self.execute_with_client(&client, report, targets, params).await
    }

    /// Executes a report with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl MozApi,
        report: MozReport,
        targets: &TargetList,
        params: &MozParams,
    ) -> Result<String> {
        info!("Running {:?} for {} targets", report, targets.len());

        let response = match report {
            MozReport::UrlMetrics => client.url_metrics(targets, params).await?,
            MozReport::LinkingRootDomains => client.linking_root_domains(targets, params).await?,
        };

        if let Some(token) = &response.next_token {
            debug!("More results available (next_token: {})", token);
        }

        let table = response.to_table(self.config.include_history);
        Ok(Formatter::new(self.config.format).format_table(&table))
    }

    /// Looks up Domain Authority for one URL.
    pub async fn domain_authority(&self, target: &str) -> Result<String> {
        let client = self.client()?;
        self.domain_authority_with_client(&client, target).await
    }

    /// Looks up Domain Authority with a provided client (for testing).
    pub async fn domain_authority_with_client(
        &self,
        client: &impl MozApi,
        target: &str,
    ) -> Result<String> {
        let authority = client.domain_authority(target).await?;

        let mut record = Record::new();
        record.insert("target", target);
        record.insert("domain_authority", authority.map(|a| a.to_string()).unwrap_or_default());
        Ok(Formatter::new(self.config.format).format_record(&record))
    }
}
