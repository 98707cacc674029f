use super::{Supplement, Window};
use crate::error::FetchError;
use crate::github::models::RawCommit;
use crate::github::JsonSource;
use crate::identity::RepoIdentity;
use crate::types::snapshot::{DailyCommits, COMMIT_WINDOW_DAYS};
use chrono::{Duration, NaiveDate, SecondsFormat};
use serde_json::Value;
use std::collections::HashMap;

const COMMITS_PER_PAGE: u32 = 100;

pub fn commits_resource(identity: &RepoIdentity, window: &Window) -> String {
    format!(
        "/repos/{}/{}/commits?since={}&per_page={}",
        identity.owner,
        identity.repo,
        window
            .commit_since()
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        COMMITS_PER_PAGE
    )
}

pub fn fetch_commit_activity<S: JsonSource + ?Sized>(
    source: &S,
    identity: &RepoIdentity,
    window: &Window,
) -> Vec<DailyCommits> {
    let today = window.today();
    let result = source
        .fetch_json(&commits_resource(identity, window))
        .and_then(|page| parse_commits(&page.body))
        .map(|commits| build_histogram(&commits, today));
    Supplement::from_result("commit_activity", result).value_or_else(|| empty_histogram(today))
}

fn parse_commits(body: &Value) -> Result<Vec<RawCommit>, FetchError> {
    let items = body
        .as_array()
        .ok_or_else(|| FetchError::Malformed("commit list is not an array".to_string()))?;
    Ok(items
        .iter()
        .filter_map(|item| serde_json::from_value::<RawCommit>(item.clone()).ok())
        .collect())
}

/// Buckets commits by UTC author day and lays them over the trailing
/// window ending at `today`, filling days without commits with zero.
pub fn build_histogram(commits: &[RawCommit], today: NaiveDate) -> Vec<DailyCommits> {
    let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
    for date in commits.iter().filter_map(RawCommit::author_date) {
        *by_day.entry(date.date_naive()).or_insert(0) += 1;
    }

    window_days(today)
        .map(|date| DailyCommits {
            date,
            commits: by_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

pub fn empty_histogram(today: NaiveDate) -> Vec<DailyCommits> {
    build_histogram(&[], today)
}

fn window_days(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let span = COMMIT_WINDOW_DAYS as i64;
    (0..span).map(move |offset| today - Duration::days(span - 1 - offset))
}
