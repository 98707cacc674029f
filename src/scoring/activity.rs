use super::log_term;
use crate::types::scoring::{Score, SUB_SCORE_MAX};
use crate::types::snapshot::RepositorySnapshot;

const COMMIT_CAP: Score = 10.0;
const COMMIT_FACTOR: f64 = 2.0;
const ISSUE_CAP: Score = 8.0;
const ISSUE_POINTS: f64 = 0.5;
const PULL_CAP: Score = 7.0;
const PULL_POINTS: f64 = 0.7;

pub fn activity_score(snapshot: &RepositorySnapshot) -> Score {
    let score = commit_term(snapshot.total_recent_commits())
        + issue_term(snapshot.recent_issues.len())
        + pull_term(snapshot.recent_prs.len());
    score.clamp(0.0, SUB_SCORE_MAX)
}

pub fn commit_term(total_commits: u64) -> Score {
    log_term(total_commits, COMMIT_FACTOR, COMMIT_CAP)
}

fn issue_term(recent_issues: usize) -> Score {
    (recent_issues as f64 * ISSUE_POINTS).min(ISSUE_CAP)
}

fn pull_term(recent_prs: usize) -> Score {
    (recent_prs as f64 * PULL_POINTS).min(PULL_CAP)
}
