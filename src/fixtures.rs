//! Snapshot builders shared by unit tests.

use crate::types::snapshot::{ActivityRecord, DailyCommits, RepositorySnapshot, COMMIT_WINDOW_DAYS};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn fetched_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("valid fixture instant")
}

/// Everything zero, false or empty; last updated two years before capture.
pub fn empty_snapshot() -> RepositorySnapshot {
    let now = fetched_at();
    let today = now.date_naive();
    RepositorySnapshot {
        owner: "acme".to_string(),
        name: "widget".to_string(),
        full_name: "acme/widget".to_string(),
        description: None,
        primary_language: None,
        topics: Vec::new(),
        license_name: None,
        homepage: None,
        html_url: None,
        clone_url: None,
        default_branch: "main".to_string(),
        size_kb: 0,
        created_at: now - Duration::days(1000),
        updated_at: now - Duration::days(730),
        fetched_at: now,
        stargazers_count: 0,
        forks_count: 0,
        watchers_count: 0,
        open_issues_count: 0,
        open_prs_count: 0,
        contributors_count: 0,
        has_issues: false,
        has_wiki: false,
        has_pages: false,
        has_projects: false,
        archived: false,
        is_fork: false,
        commit_activity: (0..COMMIT_WINDOW_DAYS as i64)
            .map(|offset| DailyCommits {
                date: today - Duration::days(COMMIT_WINDOW_DAYS as i64 - 1 - offset),
                commits: 0,
            })
            .collect(),
        recent_issues: Vec::new(),
        recent_prs: Vec::new(),
    }
}

pub fn records(count: u64) -> Vec<ActivityRecord> {
    (1..=count)
        .map(|id| ActivityRecord {
            id,
            number: id,
            title: format!("item {id}"),
            created_at: fetched_at() - Duration::days(1),
        })
        .collect()
}

pub fn with_commits(mut snapshot: RepositorySnapshot, per_day: u64) -> RepositorySnapshot {
    for day in &mut snapshot.commit_activity {
        day.commits = per_day;
    }
    snapshot
}
