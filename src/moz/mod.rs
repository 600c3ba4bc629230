//! Moz Links API v2: URL metrics and linking root domains.

mod client;
mod models;

pub use client::{MozApi, MozClient};
pub use models::{is_history_column, Endpoint, MozParams, MozResponse, MozResult, TARGETS_KEY};
