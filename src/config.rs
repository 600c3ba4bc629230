//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::error::ApiError;
use crate::semrush::VolumeFallback;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable holding the Moz access id.
pub const MOZ_ACCESS_ID_ENV: &str = "MOZ_ACCESS_ID";
/// Environment variable holding the Moz secret key.
pub const MOZ_SECRET_KEY_ENV: &str = "MOZ_SECRET_KEY";
/// Environment variable holding the SEMrush API key.
pub const SEMRUSH_API_KEY_ENV: &str = "SEMRUSH_API_KEY";
/// Environment variable holding the classifier API key.
pub const CLASSIFIER_API_KEY_ENV: &str = "CLASSIFIER_API_KEY";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Moz access id
    #[serde(default)]
    pub moz_access_id: Option<String>,

    /// Moz secret key
    #[serde(default)]
    pub moz_secret_key: Option<String>,

    /// SEMrush API key
    #[serde(default)]
    pub semrush_api_key: Option<String>,

    /// URL classifier API key
    #[serde(default)]
    pub classifier_api_key: Option<String>,

    /// SEMrush regional database
    #[serde(default = "default_semrush_database")]
    pub semrush_database: String,

    /// Row limit for SEMrush table reports
    #[serde(default)]
    pub display_limit: Option<u32>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// What to report when a keyword has no search volume
    #[serde(default)]
    pub volume_fallback: VolumeFallback,

    /// Keep Moz history columns when formatting tables
    #[serde(default)]
    pub include_history: bool,
}

fn default_semrush_database() -> String {
    "us".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            moz_access_id: None,
            moz_secret_key: None,
            semrush_api_key: None,
            classifier_api_key: None,
            semrush_database: default_semrush_database(),
            display_limit: None,
            timeout_secs: default_timeout_secs(),
            proxy: None,
            format: OutputFormat::Table,
            volume_fallback: VolumeFallback::Absent,
            include_history: false,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("seo-apis").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Some(id) = env_value(MOZ_ACCESS_ID_ENV) {
            self.moz_access_id = Some(id);
        }

        if let Some(secret) = env_value(MOZ_SECRET_KEY_ENV) {
            self.moz_secret_key = Some(secret);
        }

        if let Some(key) = env_value(SEMRUSH_API_KEY_ENV) {
            self.semrush_api_key = Some(key);
        }

        if let Some(key) = env_value(CLASSIFIER_API_KEY_ENV) {
            self.classifier_api_key = Some(key);
        }

        if let Some(database) = env_value("SEMRUSH_DATABASE") {
            self.semrush_database = database;
        }

        if let Some(timeout) = env_value("SEO_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }

    /// Moz credentials, failing if either half is missing.
    pub fn moz_credentials(&self) -> Result<MozCredentials, ApiError> {
        let access_id = present(&self.moz_access_id).ok_or(ApiError::MissingCredentials(MOZ_ACCESS_ID_ENV))?;
        let secret_key =
            present(&self.moz_secret_key).ok_or(ApiError::MissingCredentials(MOZ_SECRET_KEY_ENV))?;
        Ok(MozCredentials::new(access_id, secret_key))
    }

    /// SEMrush API key, failing if missing.
    pub fn semrush_api_key(&self) -> Result<&str, ApiError> {
        present(&self.semrush_api_key).ok_or(ApiError::MissingCredentials(SEMRUSH_API_KEY_ENV))
    }

    /// Classifier API key, failing if missing.
    pub fn classifier_api_key(&self) -> Result<&str, ApiError> {
        present(&self.classifier_api_key).ok_or(ApiError::MissingCredentials(CLASSIFIER_API_KEY_ENV))
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Moz access id / secret key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct MozCredentials {
    pub access_id: String,
    pub secret_key: String,
}

impl MozCredentials {
    pub fn new(access_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self { access_id: access_id.into(), secret_key: secret_key.into() }
    }

    /// Reads `MOZ_ACCESS_ID` and `MOZ_SECRET_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        Config::new().with_env().moz_credentials()
    }

    /// `Authorization` header value: `Basic base64(access_id:secret_key)`.
    pub fn basic_auth_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.access_id, self.secret_key));
        format!("Basic {}", token)
    }
}

impl std::fmt::Debug for MozCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MozCredentials")
            .field("access_id", &self.access_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
