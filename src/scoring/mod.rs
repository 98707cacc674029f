//! Health Scorer: four independently capped 0-25 sub-scores and a weighted
//! 0-100 total. Pure and total over normalized snapshots.

pub mod activity;
pub mod community;
pub mod maintenance;
pub mod popularity;

use crate::types::config::ScoringSettings;
use crate::types::scoring::{HealthScore, Score};
use crate::types::snapshot::RepositorySnapshot;

/// Scores with the default weights and issue ratio.
#[cfg_attr(not(test), allow(dead_code))]
pub fn score(snapshot: &RepositorySnapshot) -> HealthScore {
    score_with(snapshot, &ScoringSettings::default())
}

pub fn score_with(snapshot: &RepositorySnapshot, settings: &ScoringSettings) -> HealthScore {
    HealthScore::new(
        activity::activity_score(snapshot),
        popularity::popularity_score(snapshot),
        community::community_score(snapshot),
        maintenance::maintenance_score(snapshot, settings.expected_issue_ratio),
        &settings.weights,
    )
}

/// `min(cap, ln(count + 1) * factor)`, and exactly zero for a zero count.
pub(crate) fn log_term(count: u64, factor: f64, cap: Score) -> Score {
    if count == 0 {
        return 0.0;
    }
    ((count as f64 + 1.0).ln() * factor).min(cap)
}
