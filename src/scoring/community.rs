use crate::types::scoring::{Score, SUB_SCORE_MAX};
use crate::types::snapshot::RepositorySnapshot;

const CONTRIBUTOR_CAP: Score = 15.0;
const CONTRIBUTOR_FACTOR: f64 = 3.0;
const FEATURE_POINTS: Score = 1.25;

pub fn community_score(snapshot: &RepositorySnapshot) -> Score {
    let score = contributor_term(snapshot.contributors_count)
        + ratio_term(snapshot.stargazers_count, snapshot.forks_count)
        + feature_term(snapshot);
    score.clamp(0.0, SUB_SCORE_MAX)
}

/// `ln(contributors)`, not `ln(contributors + 1)`: a single contributor earns nothing.
pub fn contributor_term(contributors: u64) -> Score {
    if contributors == 0 {
        return 0.0;
    }
    ((contributors as f64).ln() * CONTRIBUTOR_FACTOR).min(CONTRIBUTOR_CAP)
}

pub fn ratio_term(stars: u64, forks: u64) -> Score {
    if stars == 0 {
        return 0.0;
    }
    if forks == 0 {
        return 2.0;
    }
    let ratio = stars as f64 / forks as f64;
    if (2.0..=10.0).contains(&ratio) {
        5.0
    } else if (1.0..2.0).contains(&ratio) || (ratio > 10.0 && ratio <= 20.0) {
        3.0
    } else {
        1.0
    }
}

fn feature_term(snapshot: &RepositorySnapshot) -> Score {
    let enabled = [
        snapshot.has_wiki,
        snapshot.has_issues,
        snapshot.has_projects,
        snapshot.has_pages,
    ]
    .iter()
    .filter(|flag| **flag)
    .count();
    enabled as f64 * FEATURE_POINTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::empty_snapshot;

    #[test]
    fn single_contributor_earns_no_contributor_points() {
        assert_eq!(contributor_term(0), 0.0);
        assert_eq!(contributor_term(1), 0.0);
        assert!((contributor_term(2) - 2f64.ln() * 3.0).abs() < 1e-9);
        assert_eq!(contributor_term(1_000), 15.0);
    }

    #[test]
    fn ratio_bands() {
        assert_eq!(ratio_term(0, 10), 0.0);
        assert_eq!(ratio_term(5, 0), 2.0);
        assert_eq!(ratio_term(20, 10), 5.0);
        assert_eq!(ratio_term(100, 10), 5.0);
        assert_eq!(ratio_term(15, 10), 3.0);
        assert_eq!(ratio_term(10, 10), 3.0);
        assert_eq!(ratio_term(101, 10), 3.0);
        assert_eq!(ratio_term(200, 10), 3.0);
        assert_eq!(ratio_term(201, 10), 1.0);
        assert_eq!(ratio_term(5, 10), 1.0);
    }

    #[test]
    fn features_add_quarter_points() {
        let mut snapshot = empty_snapshot();
        assert_eq!(community_score(&snapshot), 0.0);
        snapshot.has_wiki = true;
        snapshot.has_issues = true;
        snapshot.has_projects = true;
        snapshot.has_pages = true;
        assert_eq!(community_score(&snapshot), 5.0);
    }

    #[test]
    fn community_is_capped() {
        let mut snapshot = empty_snapshot();
        snapshot.contributors_count = 10_000;
        snapshot.stargazers_count = 500;
        snapshot.forks_count = 100;
        snapshot.has_wiki = true;
        snapshot.has_issues = true;
        snapshot.has_projects = true;
        snapshot.has_pages = true;
        assert_eq!(community_score(&snapshot), 25.0);
    }
}
