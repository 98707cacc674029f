//! HTTP implementation of [`JsonSource`] for the GitHub REST API.
//!
//! Uses ureq (sync HTTP). Status codes are translated here so callers only
//! ever see [`FetchError`].

use super::{last_page_from_link, JsonPage, JsonSource};
use crate::error::FetchError;
use crate::types::config::HealthConfig;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    agent: ureq::Agent,
    base_url: String,
    user_agent: String,
    token: Option<String>,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl GitHubClient {
    pub fn new(config: &HealthConfig, token: Option<String>) -> Self {
        let client = Self {
            agent: make_agent(config.timeout()),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            user_agent: config.user_agent(),
            token: token.filter(|value| !value.trim().is_empty()),
        };
        debug!(
            base_url = %client.base_url,
            authenticated = client.is_authenticated(),
            "api client ready"
        );
        client
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
    }
}

impl JsonSource for GitHubClient {
    fn fetch_json(&self, resource: &str) -> Result<JsonPage, FetchError> {
        let url = self.url_for(resource);
        debug!(%url, "requesting");

        let mut request = self
            .agent
            .get(url.as_str())
            .header("Accept", ACCEPT)
            .header("User-Agent", &self.user_agent)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let response = request
            .call()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let last_page = response
            .headers()
            .get("link")
            .and_then(|value| value.to_str().ok())
            .and_then(last_page_from_link);

        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(classify_status(status, resource, message));
        }

        let body: Value = response
            .into_body()
            .read_json()
            .map_err(|e| FetchError::Malformed(format!("{resource}: {e}")))?;

        Ok(JsonPage::new(body).with_last_page(last_page))
    }
}

pub(crate) fn classify_status(status: u16, resource: &str, message: String) -> FetchError {
    match status {
        404 => FetchError::NotFound(resource.to_string()),
        401 => FetchError::Unauthorized(resource.to_string()),
        // 403 on public data is the primary or secondary rate limit.
        403 | 429 => FetchError::RateLimited(resource.to_string()),
        _ => FetchError::Http { status, message },
    }
}
