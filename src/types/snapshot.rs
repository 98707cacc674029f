use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Length of the trailing commit histogram, in calendar days.
pub const COMMIT_WINDOW_DAYS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCommits {
    pub date: NaiveDate,
    pub commits: u64,
}

/// An issue or pull request opened inside the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: u64,
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// One capture of a repository's metadata and recent activity.
///
/// Counters and flags are already normalized: anything the platform left
/// out, or a supplementary fetch failed to deliver, is zero/false/empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub owner: String,
    pub name: String,
    pub full_name: String,

    pub description: Option<String>,
    pub primary_language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license_name: Option<String>,
    pub homepage: Option<String>,
    pub html_url: Option<String>,
    pub clone_url: Option<String>,
    pub default_branch: String,
    #[serde(default)]
    pub size_kb: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fetched_at: DateTime<Utc>,

    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub open_prs_count: u64,
    #[serde(default)]
    pub contributors_count: u64,

    #[serde(default)]
    pub has_issues: bool,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub has_projects: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub is_fork: bool,

    pub commit_activity: Vec<DailyCommits>,
    #[serde(default)]
    pub recent_issues: Vec<ActivityRecord>,
    #[serde(default)]
    pub recent_prs: Vec<ActivityRecord>,
}

impl RepositorySnapshot {
    pub fn total_recent_commits(&self) -> u64 {
        self.commit_activity.iter().map(|day| day.commits).sum()
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false)
    }

    /// Whole days between the last update and the capture instant.
    ///
    /// Negative spans (clock skew) count as zero.
    pub fn days_since_update(&self) -> i64 {
        self.fetched_at
            .signed_duration_since(self.updated_at)
            .num_days()
            .max(0)
    }
}
