//! CSV request line and response handling for the classifier endpoint.

use serde::{Deserialize, Serialize};

/// Builds the `"url","title","snippet"` request line.
///
/// Embedded double quotes are escaped as `\"`, which is what the endpoint
/// expects (not the RFC 4180 `""` form).
pub fn encode_payload(url: &str, title: &str, snippet: &str) -> String {
    [url, title, snippet].iter().map(|field| format!("\"{}\"", escape(field))).collect::<Vec<_>>().join(",")
}

fn escape(field: &str) -> String {
    field.replace('"', "\\\"")
}

/// Returns the category label: the first comma-separated field of the response.
pub fn parse_category(body: &str) -> String {
    let first = body.split(',').next().unwrap_or_default();
    first.trim().trim_matches('"').to_string()
}

/// A classified URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub url: String,
    pub category: String,
}
