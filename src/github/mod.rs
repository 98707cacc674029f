pub mod client;
#[cfg(test)]
pub mod fake;
pub mod models;

use crate::error::FetchError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// One JSON response plus the pagination hint the platform attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPage {
    pub body: Value,
    /// Page number of the `rel="last"` link, when the response is paginated.
    pub last_page: Option<u64>,
}

impl JsonPage {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            last_page: None,
        }
    }

    pub fn with_last_page(mut self, last_page: Option<u64>) -> Self {
        self.last_page = last_page;
        self
    }

    /// Total item count for a `per_page=1` probe.
    pub fn probe_count(&self) -> Result<u64, FetchError> {
        let items = self
            .body
            .as_array()
            .ok_or_else(|| FetchError::Malformed("expected a JSON array".to_string()))?;
        Ok(self.last_page.unwrap_or(items.len() as u64))
    }
}

/// Read-only access to the hosting platform's REST resources.
///
/// `resource` is an API path such as `/repos/owner/name/pulls?state=open`.
/// Transport, authentication and status translation are the implementor's
/// concern; every call is a single attempt.
pub trait JsonSource {
    fn fetch_json(&self, resource: &str) -> Result<JsonPage, FetchError>;
}

impl<S: JsonSource + ?Sized> JsonSource for &S {
    fn fetch_json(&self, resource: &str) -> Result<JsonPage, FetchError> {
        (**self).fetch_json(resource)
    }
}

/// Reads the page number out of the `rel="last"` entry of a `Link` header.
pub fn last_page_from_link(header: &str) -> Option<u64> {
    static PAGE: OnceLock<Regex> = OnceLock::new();
    let page = PAGE.get_or_init(|| Regex::new(r"[?&]page=(\d+)").expect("valid regex"));
    header
        .split(',')
        .find(|entry| entry.contains(r#"rel="last""#))
        .and_then(|entry| page.captures(entry))
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}
