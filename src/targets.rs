//! Target URL lists and scheme normalisation.

use crate::error::ApiError;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// Scheme prepended to targets that have none.
pub const DEFAULT_SCHEME: &str = "https";

/// Ensures a target carries a scheme, defaulting to `https://`.
///
/// Values that already have a scheme come back unchanged. Values that cannot
/// be turned into a URL are passed through as-is with a warning, so one bad
/// entry never sinks a whole batch.
pub fn normalize_target(target: &str) -> String {
    let trimmed = target.trim();

    if trimmed.contains("://") && Url::parse(trimmed).is_ok() {
        return trimmed.to_string();
    }

    let candidate = format!("{}://{}", DEFAULT_SCHEME, trimmed);
    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => candidate,
        _ => {
            warn!("Could not normalize target, sending unchanged: {}", target);
            target.to_string()
        }
    }
}

/// An ordered list of normalised target URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetList {
    urls: Vec<String>,
}

impl TargetList {
    /// Normalises each value, keeping the caller's order.
    pub fn new<S: AsRef<str>>(targets: impl IntoIterator<Item = S>) -> Self {
        let urls = targets.into_iter().map(|t| normalize_target(t.as_ref())).collect();
        Self { urls }
    }

    /// Reads one target per line; blank lines and `#` comments are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading targets from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read target file: {}", path.display()))?;

        Ok(Self::from_lines(&content))
    }

    /// Parses a newline-separated list of targets.
    pub fn from_lines(content: &str) -> Self {
        Self::new(content.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')))
    }

    /// Fails when the list is empty; used before any request goes out.
    pub fn ensure_not_empty(&self) -> Result<(), ApiError> {
        if self.urls.is_empty() {
            return Err(ApiError::NoTargets);
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// Appends one more target.
    pub fn push(&mut self, target: &str) {
        self.urls.push(normalize_target(target));
    }
}

impl<S: AsRef<str>> FromIterator<S> for TargetList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_target("example.com"), "https://example.com");
        assert_eq!(normalize_target("moz.com/blog"), "https://moz.com/blog");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(normalize_target("https://example.com"), "https://example.com");
        assert_eq!(normalize_target("http://example.com"), "http://example.com");
        assert_eq!(normalize_target("ftp://files.example.com"), "ftp://files.example.com");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_target("  example.com \n"), "https://example.com");
    }

    #[test]
    fn test_normalize_passes_through_garbage() {
        assert_eq!(normalize_target(""), "");
        assert_eq!(normalize_target("exa mple.com"), "exa mple.com");
    }

    #[test]
    fn test_target_list_keeps_order() {
        let list = TargetList::new(["b.com", "http://a.com", "c.com"]);
        assert_eq!(list.as_slice(), &["https://b.com", "http://a.com", "https://c.com"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_target_list_collect_and_push() {
        let mut list: TargetList = vec!["example.com"].into_iter().collect();
        list.push("moz.com");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["https://example.com", "https://moz.com"]);
    }

    #[test]
    fn test_target_list_empty_rejected() {
        let list = TargetList::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert!(matches!(list.ensure_not_empty(), Err(ApiError::NoTargets)));

        let list = TargetList::new(["example.com"]);
        assert!(list.ensure_not_empty().is_ok());
    }

    #[test]
    fn test_target_list_from_lines() {
        let list = TargetList::from_lines("# sites\nexample.com\n\n  moz.com  \n# done\n");
        assert_eq!(list.as_slice(), &["https://example.com", "https://moz.com"]);
    }

    #[test]
    fn test_target_list_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "example.com\nhttp://semrush.com").unwrap();

        let list = TargetList::from_file(file.path()).unwrap();
        assert_eq!(list.as_slice(), &["https://example.com", "http://semrush.com"]);
    }

    #[test]
    fn test_target_list_from_missing_file() {
        let err = TargetList::from_file("/nonexistent/targets.txt").unwrap_err();
        assert!(err.to_string().contains("Failed to read target file"));
    }
}
