//! Error types shared by the provider clients and parsers.

use thiserror::Error;

/// Failures turning a raw provider body into records or tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The body contained no header line
    #[error("Response body is empty")]
    Empty,

    /// A single-record report returned a header but no values
    #[error("Response has a header but no data row")]
    MissingDataRow,

    /// A data line does not line up with the header
    #[error("Line {line} has {found} fields, header has {expected}")]
    ColumnMismatch { line: usize, expected: usize, found: usize },

    /// A numeric column held something other than an integer
    #[error("Column '{column}' is not an integer: {value}")]
    InvalidNumber { column: String, value: String },
}

/// Errors raised by the API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required credential was not configured
    #[error("Missing credential: {0}")]
    MissingCredentials(&'static str),

    /// Request parameters were rejected before sending
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The target list was empty
    #[error("No target URLs given")]
    NoTargets,

    /// The provider answered with a non-success status; `body` is the raw response
    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// Transport-level failure
    #[error("Request error: {0}")]
    Transport(#[from] wreq::Error),

    /// JSON body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text body could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl ApiError {
    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::InvalidParameter { name: name.into(), reason: reason.into() }
    }
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
