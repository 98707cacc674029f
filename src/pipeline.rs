use crate::aggregate::{self, Window};
use crate::error::{HealthError, Result};
use crate::github::JsonSource;
use crate::identity::{require_identity, RepoIdentity};
use crate::scoring;
use crate::types::config::{HealthConfig, ScoringSettings};
use crate::types::report::{AnalysisReport, Comparison};
use crate::types::snapshot::{RepositorySnapshot, COMMIT_WINDOW_DAYS};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Parses `input`, aggregates a snapshot and scores it.
pub fn run_analysis<S: JsonSource + ?Sized>(
    source: &S,
    input: &str,
    config: &HealthConfig,
) -> Result<AnalysisReport> {
    let identity = require_identity(input, &config.host())?;
    let window = Window::current(config.recent_days());
    analyze_identity(source, &identity, &window, &config.scoring())
}

pub fn analyze_identity<S: JsonSource + ?Sized>(
    source: &S,
    identity: &RepoIdentity,
    window: &Window,
    settings: &ScoringSettings,
) -> Result<AnalysisReport> {
    let snapshot = aggregate::aggregate(source, identity, window)?;
    let score = scoring::score_with(&snapshot, settings);
    info!(
        repo = %identity,
        total = score.total_score,
        "analysis complete"
    );
    Ok(AnalysisReport::new(snapshot, score))
}

/// Runs two independent pipelines side by side and diffs their scores.
///
/// Both identities are validated before any request is made.
pub fn run_comparison<S: JsonSource + Sync + ?Sized>(
    source: &S,
    left: &str,
    right: &str,
    config: &HealthConfig,
) -> Result<Comparison> {
    let host = config.host();
    let left = require_identity(left, &host)?;
    let right = require_identity(right, &host)?;
    let window = Window::current(config.recent_days());
    let settings = config.scoring();

    let (left, right) = std::thread::scope(|scope| {
        let left_handle = scope.spawn(|| analyze_identity(source, &left, &window, &settings));
        let right = analyze_identity(source, &right, &window, &settings);
        let left = match left_handle.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        };
        (left, right)
    });

    Ok(Comparison::new(left?, right?))
}

/// Re-scores a snapshot exported by `analyze --format json`.
///
/// Accepts either a bare snapshot or a full analysis report.
pub fn score_snapshot_file(path: &Path, settings: &ScoringSettings) -> Result<AnalysisReport> {
    let content = std::fs::read_to_string(path)?;
    let mut value: Value = serde_json::from_str(&content)?;
    if let Some(snapshot) = value.get_mut("snapshot") {
        value = snapshot.take();
    }
    let snapshot: RepositorySnapshot = serde_json::from_value(value)?;
    if snapshot.commit_activity.len() != COMMIT_WINDOW_DAYS {
        return Err(HealthError::MalformedPayload(format!(
            "commit_activity must have {} entries (found {})",
            COMMIT_WINDOW_DAYS,
            snapshot.commit_activity.len()
        )));
    }
    let score = scoring::score_with(&snapshot, settings);
    Ok(AnalysisReport::new(snapshot, score))
}
