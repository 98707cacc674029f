//! Builds a [`RepositorySnapshot`] from the hosting platform's API.
//!
//! The base metadata fetch is the only fatal step. Every supplementary
//! fetch runs once and, on failure, degrades its field to the empty
//! default so the rest of the snapshot survives.

pub mod activity;
pub mod commits;

use crate::error::{FetchError, HealthError, Result};
use crate::github::models::RawRepository;
use crate::github::JsonSource;
use crate::identity::RepoIdentity;
use crate::types::snapshot::{ActivityRecord, DailyCommits, RepositorySnapshot};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info, warn};

/// Fixed lookback for the commit histogram request.
const COMMIT_LOOKBACK_DAYS: i64 = 30;

/// Outcome of one supplementary fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Supplement<T> {
    Fetched(T),
    Degraded {
        field: &'static str,
        reason: FetchError,
    },
}

impl<T> Supplement<T> {
    pub fn from_result(field: &'static str, result: std::result::Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Supplement::Fetched(value),
            Err(reason) => {
                warn!(field, reason = %reason, "supplementary fetch failed; using default");
                Supplement::Degraded { field, reason }
            }
        }
    }

    pub fn value_or_else(self, default: impl FnOnce() -> T) -> T {
        match self {
            Supplement::Fetched(value) => value,
            Supplement::Degraded { .. } => default(),
        }
    }
}

impl<T: Default> Supplement<T> {
    pub fn into_value_or_default(self) -> T {
        self.value_or_else(T::default)
    }
}

/// The instant an analysis runs at and how far back "recent" reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub now: DateTime<Utc>,
    pub recent_days: u32,
}

impl Window {
    pub fn new(now: DateTime<Utc>, recent_days: u32) -> Self {
        Self { now, recent_days }
    }

    pub fn current(recent_days: u32) -> Self {
        Self::new(Utc::now(), recent_days)
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn recent_cutoff(&self) -> DateTime<Utc> {
        self.now - Duration::days(i64::from(self.recent_days))
    }

    pub fn commit_since(&self) -> DateTime<Utc> {
        self.now - Duration::days(COMMIT_LOOKBACK_DAYS)
    }
}

pub fn repository_resource(identity: &RepoIdentity) -> String {
    format!("/repos/{}/{}", identity.owner, identity.repo)
}

pub fn contributors_resource(identity: &RepoIdentity) -> String {
    format!("/repos/{}/{}/contributors?per_page=1", identity.owner, identity.repo)
}

pub fn open_pulls_probe_resource(identity: &RepoIdentity) -> String {
    format!(
        "/repos/{}/{}/pulls?state=open&per_page=1",
        identity.owner, identity.repo
    )
}

pub fn aggregate<S: JsonSource + ?Sized>(
    source: &S,
    identity: &RepoIdentity,
    window: &Window,
) -> Result<RepositorySnapshot> {
    let base = fetch_base(source, identity)?;
    info!(repo = %identity, "repository metadata fetched");

    let supplements = Supplements {
        contributors_count: probe_count(
            source,
            "contributors_count",
            &contributors_resource(identity),
        ),
        open_prs_count: probe_count(
            source,
            "open_prs_count",
            &open_pulls_probe_resource(identity),
        ),
        commit_activity: commits::fetch_commit_activity(source, identity, window),
        recent_issues: activity::fetch_recent_issues(source, identity, window),
        recent_prs: activity::fetch_recent_pulls(source, identity, window),
    };
    debug!(
        repo = %identity,
        contributors = supplements.contributors_count,
        recent_issues = supplements.recent_issues.len(),
        recent_prs = supplements.recent_prs.len(),
        "supplementary data collected"
    );

    Ok(normalize(identity, base, window.now, supplements))
}

fn fetch_base<S: JsonSource + ?Sized>(
    source: &S,
    identity: &RepoIdentity,
) -> Result<RawRepository> {
    let page = source
        .fetch_json(&repository_resource(identity))
        .map_err(|error| match error {
            FetchError::NotFound(_) => HealthError::NotFound(identity.full_name()),
            other => HealthError::from(other),
        })?;

    if !page.body.is_object() {
        return Err(HealthError::MalformedPayload(format!(
            "repository metadata for {identity} is not an object"
        )));
    }
    serde_json::from_value(page.body)
        .map_err(|e| HealthError::MalformedPayload(format!("{identity}: {e}")))
}

fn probe_count<S: JsonSource + ?Sized>(source: &S, field: &'static str, resource: &str) -> u64 {
    let result = source
        .fetch_json(resource)
        .and_then(|page| page.probe_count());
    Supplement::from_result(field, result).into_value_or_default()
}

struct Supplements {
    contributors_count: u64,
    open_prs_count: u64,
    commit_activity: Vec<DailyCommits>,
    recent_issues: Vec<ActivityRecord>,
    recent_prs: Vec<ActivityRecord>,
}

fn normalize(
    identity: &RepoIdentity,
    raw: RawRepository,
    fetched_at: DateTime<Utc>,
    supplements: Supplements,
) -> RepositorySnapshot {
    let owner = raw
        .owner
        .and_then(|owner| owner.login)
        .unwrap_or_else(|| identity.owner.clone());
    let name = raw.name.unwrap_or_else(|| identity.repo.clone());
    let full_name = raw
        .full_name
        .unwrap_or_else(|| format!("{owner}/{name}"));

    RepositorySnapshot {
        owner,
        name,
        full_name,
        description: raw.description.filter(|text| !text.trim().is_empty()),
        primary_language: raw.language,
        topics: raw.topics,
        license_name: raw.license.and_then(|license| license.display_name()),
        homepage: raw.homepage.filter(|url| !url.trim().is_empty()),
        html_url: raw.html_url,
        clone_url: raw.clone_url,
        default_branch: raw.default_branch.unwrap_or_else(|| "main".to_string()),
        size_kb: raw.size.unwrap_or(0),
        created_at: raw.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        updated_at: raw.updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        fetched_at,
        stargazers_count: raw.stargazers_count.unwrap_or(0),
        forks_count: raw.forks_count.unwrap_or(0),
        watchers_count: raw.watchers_count.unwrap_or(0),
        open_issues_count: raw.open_issues_count.unwrap_or(0),
        open_prs_count: supplements.open_prs_count,
        contributors_count: supplements.contributors_count,
        has_issues: raw.has_issues.unwrap_or(false),
        has_wiki: raw.has_wiki.unwrap_or(false),
        has_pages: raw.has_pages.unwrap_or(false),
        has_projects: raw.has_projects.unwrap_or(false),
        archived: raw.archived.unwrap_or(false),
        is_fork: raw.fork.unwrap_or(false),
        commit_activity: supplements.commit_activity,
        recent_issues: supplements.recent_issues,
        recent_prs: supplements.recent_prs,
    }
}
