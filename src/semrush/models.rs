//! Data models for SEMrush reports.

use crate::error::ParseError;
use crate::table::{Record, Table};
use serde::{Deserialize, Serialize};

/// Column holding the monthly search volume in keyword reports.
pub const SEARCH_VOLUME_COLUMN: &str = "Search Volume";

/// An error payload returned in place of report data (`ERROR 50 :: NOTHING FOUND`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    /// Everything before ` :: `, e.g. `ERROR 50`
    pub code: String,
    /// Everything after ` :: `
    pub message: String,
}

impl ProviderError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }

    /// The single-entry code → message record callers can treat like data.
    pub fn to_record(&self) -> Record {
        Record::from_pairs([(self.code.clone(), self.message.clone())])
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {}", self.code, self.message)
    }
}

/// Either report data or a provider error; neither is a Rust error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemrushResponse<T> {
    Data(T),
    Error(ProviderError),
}

impl<T> SemrushResponse<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, SemrushResponse::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            SemrushResponse::Data(data) => Some(data),
            SemrushResponse::Error(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            SemrushResponse::Data(data) => Some(data),
            SemrushResponse::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            SemrushResponse::Data(_) => None,
            SemrushResponse::Error(error) => Some(error),
        }
    }
}

impl SemrushResponse<Record> {
    /// Flattens into a record; an error becomes its code → message entry.
    pub fn into_record(self) -> Record {
        match self {
            SemrushResponse::Data(record) => record,
            SemrushResponse::Error(error) => error.to_record(),
        }
    }

    /// Extracts the search volume according to `fallback`.
    ///
    /// An error response has no `Search Volume` column, so it follows the
    /// same path as a missing column.
    pub fn search_volume(&self, fallback: VolumeFallback) -> Result<Option<u64>, ParseError> {
        let volume = match self {
            SemrushResponse::Data(record) => record.get_u64(SEARCH_VOLUME_COLUMN)?,
            SemrushResponse::Error(_) => None,
        };
        Ok(fallback.apply(volume))
    }
}

impl SemrushResponse<Table> {
    /// Flattens into a table; an error becomes a one-row code → message table.
    pub fn into_table(self) -> Table {
        match self {
            SemrushResponse::Data(table) => table,
            SemrushResponse::Error(error) => Table::from(error.to_record()),
        }
    }
}

/// What to report when a keyword has no search volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeFallback {
    /// Report the volume as absent
    #[default]
    Absent,
    /// Report zero, treating any error as "no searches"
    Zero,
}

impl VolumeFallback {
    pub fn apply(self, volume: Option<u64>) -> Option<u64> {
        match (self, volume) {
            (_, Some(v)) => Some(v),
            (VolumeFallback::Absent, None) => None,
            // Conflates "no data" and "API error" with a real zero; opt-in only.
            (VolumeFallback::Zero, None) => Some(0),
        }
    }
}

impl std::str::FromStr for VolumeFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "absent" | "none" => Ok(VolumeFallback::Absent),
            "zero" | "0" => Ok(VolumeFallback::Zero),
            _ => Err(format!("Unknown volume fallback: {}. Use: absent, zero", s)),
        }
    }
}

/// SEMrush report types used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Keyword overview for one database
    PhraseThis,
    /// Organic search results for a keyword
    PhraseOrganic,
    /// Keywords related to a keyword
    PhraseRelated,
}

impl ReportType {
    /// Value of the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::PhraseThis => "phrase_this",
            ReportType::PhraseOrganic => "phrase_organic",
            ReportType::PhraseRelated => "phrase_related",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional fields shared by the keyword reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Regional database override (`us`, `uk`, `de`, ...)
    pub database: Option<String>,
    /// Maximum number of rows (`display_limit`)
    pub display_limit: Option<u32>,
    /// Column codes to export (`export_columns`), e.g. `Ph`, `Nq`, `Cp`
    pub export_columns: Vec<String>,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn display_limit(mut self, limit: u32) -> Self {
        self.display_limit = Some(limit);
        self
    }

    pub fn export_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.export_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}
