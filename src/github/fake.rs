use super::{JsonPage, JsonSource};
use crate::error::FetchError;
use serde_json::Value;
use std::sync::Mutex;

/// In-memory source keyed by resource prefix. The longest matching prefix
/// wins; on equal length the later registration wins.
#[derive(Default)]
pub struct FakeSource {
    routes: Vec<(String, Result<JsonPage, FetchError>)>,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, prefix: &str, body: Value) -> Self {
        self.routes.push((prefix.to_string(), Ok(JsonPage::new(body))));
        self
    }

    pub fn respond_paged(mut self, prefix: &str, body: Value, last_page: u64) -> Self {
        self.routes.push((
            prefix.to_string(),
            Ok(JsonPage::new(body).with_last_page(Some(last_page))),
        ));
        self
    }

    pub fn fail(mut self, prefix: &str, error: FetchError) -> Self {
        self.routes.push((prefix.to_string(), Err(error)));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl JsonSource for FakeSource {
    fn fetch_json(&self, resource: &str) -> Result<JsonPage, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(resource.to_string());
        }
        self.routes
            .iter()
            .filter(|(prefix, _)| resource.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Err(FetchError::NotFound(resource.to_string())))
    }
}
