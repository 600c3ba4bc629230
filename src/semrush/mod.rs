//! SEMrush Analytics API: keyword overview, organic results and related keywords.
//!
//! Responses are `;`-delimited text rather than JSON; see [`parser`].

mod client;
mod models;
pub mod parser;

pub use client::{SemrushApi, SemrushClient};
pub use models::{
    ProviderError, ReportOptions, ReportType, SemrushResponse, VolumeFallback,
    SEARCH_VOLUME_COLUMN,
};
