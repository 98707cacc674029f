//! Payload shapes returned by the hosting platform's REST API.
//!
//! Only the fields the aggregator reads are modelled; everything is
//! optional so that sparse payloads still deserialize.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOwner {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLicense {
    pub name: Option<String>,
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepository {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub owner: Option<RawOwner>,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<RawLicense>,
    pub homepage: Option<String>,
    pub html_url: Option<String>,
    pub clone_url: Option<String>,
    pub default_branch: Option<String>,
    pub size: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub watchers_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub has_issues: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_pages: Option<bool>,
    pub has_projects: Option<bool>,
    pub archived: Option<bool>,
    pub fork: Option<bool>,
}

impl RawLicense {
    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.spdx_id.clone())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSignature {
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommitDetail {
    pub author: Option<RawSignature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommit {
    pub commit: Option<RawCommitDetail>,
}

impl RawCommit {
    pub fn author_date(&self) -> Option<DateTime<Utc>> {
        self.commit
            .as_ref()
            .and_then(|detail| detail.author.as_ref())
            .and_then(|author| author.date)
    }
}

/// Shared shape of issue and pull request list items.
#[derive(Debug, Clone, Deserialize)]
pub struct RawActivityItem {
    pub id: u64,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
