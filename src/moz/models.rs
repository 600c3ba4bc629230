//! Request parameters and response models for the Moz Links API.

use crate::error::{ApiError, Result};
use crate::table::Table;
use crate::targets::TargetList;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body key holding the target URLs; callers cannot set it through params.
pub const TARGETS_KEY: &str = "targets";

/// Moz API endpoints used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    UrlMetrics,
    LinkingRootDomains,
}

impl Endpoint {
    /// Path segment under `/v2/`.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::UrlMetrics => "url_metrics",
            Endpoint::LinkingRootDomains => "linking_root_domains",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Extra request parameters. Every value is a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MozParams {
    fields: Map<String, Value>,
}

impl MozParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Daily history series to include (e.g. `domain_authority`).
    pub fn daily_history_values<S: Into<String>>(self, columns: impl IntoIterator<Item = S>) -> Self {
        self.with_strings("daily_history_values", columns)
    }

    /// Daily history deltas to include.
    pub fn daily_history_deltas<S: Into<String>>(self, columns: impl IntoIterator<Item = S>) -> Self {
        self.with_strings("daily_history_deltas", columns)
    }

    /// Monthly history series to include.
    pub fn monthly_history_values<S: Into<String>>(self, columns: impl IntoIterator<Item = S>) -> Self {
        self.with_strings("monthly_history_values", columns)
    }

    /// Monthly history deltas to include.
    pub fn monthly_history_deltas<S: Into<String>>(self, columns: impl IntoIterator<Item = S>) -> Self {
        self.with_strings("monthly_history_deltas", columns)
    }

    /// Sets any other list-valued parameter.
    pub fn insert<V: Into<Value>>(
        &mut self,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<()> {
        if name == TARGETS_KEY {
            return Err(ApiError::invalid_parameter(name, "targets are passed separately"));
        }
        self.fields.insert(name.to_string(), Value::Array(values.into_iter().map(Into::into).collect()));
        Ok(())
    }

    /// Validates an arbitrary JSON object, rejecting any non-list value.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ApiError::invalid_parameter("params", "expected a JSON object"));
        };

        let mut params = Self::new();
        for (name, value) in map {
            match value {
                Value::Array(values) => params.insert(&name, values)?,
                other => {
                    return Err(ApiError::invalid_parameter(
                        name,
                        format!("expected a list, got {}", json_kind(&other)),
                    ))
                }
            }
        }
        Ok(params)
    }

    /// Parses and validates a JSON object string.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(raw)?)
    }

    pub fn get(&self, name: &str) -> Option<&Vec<Value>> {
        self.fields.get(name).and_then(Value::as_array)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Request body: `{"targets": [...], ...params}`.
    pub fn to_body(&self, targets: &TargetList) -> Value {
        let mut body = Map::new();
        body.insert(
            TARGETS_KEY.to_string(),
            Value::Array(targets.iter().map(|t| Value::String(t.to_string())).collect()),
        );
        for (name, value) in &self.fields {
            body.insert(name.clone(), value.clone());
        }
        Value::Object(body)
    }

    fn with_strings<S: Into<String>>(mut self, name: &str, values: impl IntoIterator<Item = S>) -> Self {
        let values = values.into_iter().map(|v| Value::String(v.into())).collect();
        self.fields.insert(name.to_string(), Value::Array(values));
        self
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// One result object, keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MozResult(pub Map<String, Value>);

impl MozResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The URL or domain this result describes.
    pub fn page(&self) -> Option<&str> {
        self.get("page").or_else(|| self.get("root_domain")).and_then(Value::as_str)
    }

    pub fn domain_authority(&self) -> Option<f64> {
        self.get("domain_authority").and_then(Value::as_f64)
    }

    pub fn page_authority(&self) -> Option<f64> {
        self.get("page_authority").and_then(Value::as_f64)
    }

    pub fn spam_score(&self) -> Option<f64> {
        self.get("spam_score").and_then(Value::as_f64)
    }
}

/// Response envelope: `{"results": [...]}` plus an optional paging token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MozResponse {
    #[serde(default)]
    pub results: Vec<MozResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl MozResponse {
    pub fn first(&self) -> Option<&MozResult> {
        self.results.first()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Flattens results into a table, one row per result.
    ///
    /// Columns are the union of keys in first-seen order. History columns are
    /// dropped unless `include_history` is set.
    pub fn to_table(&self, include_history: bool) -> Table {
        let mut columns: Vec<&str> = Vec::new();
        for result in &self.results {
            for key in result.0.keys() {
                if !include_history && is_history_column(key) {
                    continue;
                }
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }

        let mut table = Table::new(columns.iter().copied());
        for result in &self.results {
            let row: Vec<String> =
                columns.iter().map(|c| result.get(c).map(cell_text).unwrap_or_default()).collect();
            // Row width always matches the collected header.
            let _ = table.push_row(row);
        }
        table
    }
}

/// Whether a result key holds a history series rather than a scalar metric.
pub fn is_history_column(key: &str) -> bool {
    key.contains("history")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_response() -> MozResponse {
        serde_json::from_value(json!({
            "results": [
                {
                    "page": "moz.com/",
                    "domain_authority": 91,
                    "page_authority": 69,
                    "spam_score": 1,
                    "daily_history_values": [{"date": "2024-01-01", "domain_authority": 91}]
                },
                {
                    "page": "example.com/",
                    "domain_authority": 93,
                    "page_authority": 65,
                    "root_domains_to_root_domain": 220000
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_params_builder() {
        let params = MozParams::new()
            .daily_history_values(["domain_authority", "page_authority"])
            .monthly_history_deltas(["spam_score"]);

        assert_eq!(params.get("daily_history_values").unwrap().len(), 2);
        assert_eq!(params.get("monthly_history_deltas").unwrap()[0], "spam_score");
        assert!(params.get("daily_history_deltas").is_none());
    }

    #[test]
    fn test_params_from_json_accepts_lists() {
        let params = MozParams::from_json(json!({
            "daily_history_values": ["domain_authority"],
            "distributions": [true]
        }))
        .unwrap();
        assert_eq!(params.get("distributions").unwrap()[0], true);
    }

    #[test]
    fn test_params_from_json_rejects_scalars() {
        let err = MozParams::from_json(json!({"daily_history_values": "domain_authority"})).unwrap_err();
        match err {
            ApiError::InvalidParameter { name, reason } => {
                assert_eq!(name, "daily_history_values");
                assert!(reason.contains("a string"));
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }

        assert!(MozParams::from_json(json!({"limit": 10})).is_err());
        assert!(MozParams::from_json(json!({"nested": {"a": [1]}})).is_err());
        assert!(MozParams::from_json(json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn test_params_targets_reserved() {
        let err = MozParams::from_json(json!({"targets": ["evil.com"]})).unwrap_err();
        assert!(err.to_string().contains("targets"));

        let mut params = MozParams::new();
        assert!(params.insert("targets", ["x"]).is_err());
        assert!(params.insert("scope", ["page"]).is_ok());
    }

    #[test]
    fn test_params_from_json_str() {
        let params = MozParams::from_json_str(r#"{"monthly_history_values": ["page_authority"]}"#).unwrap();
        assert!(!params.is_empty());
        assert!(matches!(MozParams::from_json_str("{not json"), Err(ApiError::Json(_))));
    }

    #[test]
    fn test_body_shape() {
        let targets = TargetList::new(["example.com", "http://moz.com"]);
        let params = MozParams::new().daily_history_values(["domain_authority"]);

        let body = params.to_body(&targets);
        assert_eq!(
            body,
            json!({
                "targets": ["https://example.com", "http://moz.com"],
                "daily_history_values": ["domain_authority"]
            })
        );
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys[0], "targets");
    }

    #[test]
    fn test_result_accessors() {
        let response = make_response();
        let first = response.first().unwrap();
        assert_eq!(first.page(), Some("moz.com/"));
        assert_eq!(first.domain_authority(), Some(91.0));
        assert_eq!(first.page_authority(), Some(69.0));
        assert_eq!(first.spam_score(), Some(1.0));
        assert_eq!(response.results[1].spam_score(), None);
        assert_eq!(response.len(), 2);
        assert!(response.next_token.is_none());
    }

    #[test]
    fn test_to_table_without_history() {
        let table = make_response().to_table(false);

        assert_eq!(
            table.columns(),
            &["page", "domain_authority", "page_authority", "spam_score", "root_domains_to_root_domain"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][1], "91");
        // missing metric renders as empty cell
        assert_eq!(table.rows()[1][3], "");
        assert_eq!(table.rows()[1][4], "220000");
    }

    #[test]
    fn test_to_table_with_history() {
        let table = make_response().to_table(true);
        let idx = table.column_index("daily_history_values").unwrap();
        assert!(table.rows()[0][idx].starts_with('['));
        assert_eq!(table.rows()[1][idx], "");
    }

    #[test]
    fn test_empty_response() {
        let response: MozResponse = serde_json::from_str("{}").unwrap();
        assert!(response.is_empty());
        assert!(response.to_table(false).columns().is_empty());
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::UrlMetrics.path(), "url_metrics");
        assert_eq!(Endpoint::LinkingRootDomains.to_string(), "linking_root_domains");
    }
}
