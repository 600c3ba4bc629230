//! seo-apis - Thin clients for the Moz, SEMrush and URL classifier SEO APIs
//!
//! Each client builds one request, sends credentials, and reshapes the
//! provider's JSON or delimited text into records and tables.

pub mod classifier;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod moz;
pub mod semrush;
pub mod table;
pub mod targets;

pub use config::{Config, MozCredentials, OutputFormat};
pub use error::{ApiError, ParseError};
pub use table::{Record, Table};
pub use targets::{normalize_target, TargetList};
