use super::{Supplement, Window};
use crate::error::FetchError;
use crate::github::models::RawActivityItem;
use crate::github::JsonSource;
use crate::identity::RepoIdentity;
use crate::types::snapshot::ActivityRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

const ISSUES_PER_PAGE: u32 = 100;
const PULLS_PER_PAGE: u32 = 50;

/// Marker the issues endpoint attaches to items that are really pull requests.
const PULL_REQUEST_MARKER: &str = "pull_request";

pub fn issues_resource(identity: &RepoIdentity, window: &Window) -> String {
    format!(
        "/repos/{}/{}/issues?since={}&per_page={}",
        identity.owner,
        identity.repo,
        window
            .recent_cutoff()
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        ISSUES_PER_PAGE
    )
}

pub fn pulls_resource(identity: &RepoIdentity, state: &str) -> String {
    format!(
        "/repos/{}/{}/pulls?state={}&per_page={}",
        identity.owner, identity.repo, state, PULLS_PER_PAGE
    )
}

pub fn fetch_recent_issues<S: JsonSource + ?Sized>(
    source: &S,
    identity: &RepoIdentity,
    window: &Window,
) -> Vec<ActivityRecord> {
    let result = source
        .fetch_json(&issues_resource(identity, window))
        .and_then(|page| issues_only(&page.body));
    Supplement::from_result("recent_issues", result).into_value_or_default()
}

pub fn fetch_recent_pulls<S: JsonSource + ?Sized>(
    source: &S,
    identity: &RepoIdentity,
    window: &Window,
) -> Vec<ActivityRecord> {
    let open = source
        .fetch_json(&pulls_resource(identity, "open"))
        .and_then(|page| activity_items(&page.body));
    let closed = source
        .fetch_json(&pulls_resource(identity, "closed"))
        .and_then(|page| activity_items(&page.body));

    let result = match (open, closed) {
        (Ok(open), Ok(closed)) => Ok(recent_pulls(open, closed, window.recent_cutoff())),
        (Ok(partial), Err(error)) | (Err(error), Ok(partial)) => {
            warn!(field = "recent_prs", reason = %error, "using one pull request list");
            Ok(recent_pulls(partial, Vec::new(), window.recent_cutoff()))
        }
        (Err(error), Err(_)) => Err(error),
    };
    Supplement::from_result("recent_prs", result).into_value_or_default()
}

/// Drops pull requests the issues endpoint mixes into its results.
pub fn issues_only(body: &Value) -> Result<Vec<ActivityRecord>, FetchError> {
    let items = list(body)?;
    Ok(items
        .iter()
        .filter(|item| item.get(PULL_REQUEST_MARKER).is_none())
        .filter_map(to_record)
        .collect())
}

fn activity_items(body: &Value) -> Result<Vec<ActivityRecord>, FetchError> {
    Ok(list(body)?.iter().filter_map(to_record).collect())
}

/// Union of open and closed pull requests created at or after `cutoff`,
/// deduplicated by id in first-seen order.
pub fn recent_pulls(
    open: Vec<ActivityRecord>,
    closed: Vec<ActivityRecord>,
    cutoff: DateTime<Utc>,
) -> Vec<ActivityRecord> {
    let mut seen = HashSet::new();
    open.into_iter()
        .chain(closed)
        .filter(|pull| pull.created_at >= cutoff)
        .filter(|pull| seen.insert(pull.id))
        .collect()
}

fn list(body: &Value) -> Result<&Vec<Value>, FetchError> {
    body.as_array()
        .ok_or_else(|| FetchError::Malformed("activity list is not an array".to_string()))
}

fn to_record(item: &Value) -> Option<ActivityRecord> {
    let raw = serde_json::from_value::<RawActivityItem>(item.clone()).ok()?;
    Some(ActivityRecord {
        id: raw.id,
        number: raw.number,
        title: raw.title.unwrap_or_default(),
        created_at: raw.created_at?,
    })
}
