use crate::types::scoring::{Score, SUB_SCORE_MAX};
use crate::types::snapshot::RepositorySnapshot;

pub fn maintenance_score(snapshot: &RepositorySnapshot, expected_issue_ratio: f64) -> Score {
    let score = recency_term(snapshot.days_since_update())
        + issue_load_term(
            snapshot.open_issues_count,
            snapshot.stargazers_count,
            expected_issue_ratio,
        )
        + indicator_term(snapshot);
    score.clamp(0.0, SUB_SCORE_MAX)
}

pub fn recency_term(days_since_update: i64) -> Score {
    match days_since_update {
        days if days <= 7 => 10.0,
        days if days <= 30 => 8.0,
        days if days <= 90 => 5.0,
        days if days <= 365 => 2.0,
        _ => 0.0,
    }
}

pub fn issue_load_term(open_issues: u64, stars: u64, expected_issue_ratio: f64) -> Score {
    if open_issues == 0 {
        return 10.0;
    }
    let expected = (stars as f64 * expected_issue_ratio).max(1.0);
    let open = open_issues as f64;
    if open <= expected {
        8.0
    } else if open <= expected * 2.0 {
        5.0
    } else if open <= expected * 5.0 {
        2.0
    } else {
        0.0
    }
}

fn indicator_term(snapshot: &RepositorySnapshot) -> Score {
    let mut score = 0.0;
    if !snapshot.archived {
        score += 2.0;
    }
    if snapshot.license_name.is_some() {
        score += 1.5;
    }
    if snapshot.has_description() {
        score += 1.5;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::empty_snapshot;
    use crate::types::config::DEFAULT_EXPECTED_ISSUE_RATIO;
    use chrono::Duration;

    #[test]
    fn recency_bands() {
        assert_eq!(recency_term(0), 10.0);
        assert_eq!(recency_term(7), 10.0);
        assert_eq!(recency_term(8), 8.0);
        assert_eq!(recency_term(30), 8.0);
        assert_eq!(recency_term(90), 5.0);
        assert_eq!(recency_term(365), 2.0);
        assert_eq!(recency_term(366), 0.0);
    }

    #[test]
    fn issue_load_scales_with_stars() {
        assert_eq!(issue_load_term(0, 0, 0.01), 10.0);
        assert_eq!(issue_load_term(1, 0, 0.01), 8.0);
        assert_eq!(issue_load_term(2, 0, 0.01), 5.0);
        assert_eq!(issue_load_term(5, 0, 0.01), 2.0);
        assert_eq!(issue_load_term(6, 0, 0.01), 0.0);
        assert_eq!(issue_load_term(100, 10_000, 0.01), 8.0);
        assert_eq!(issue_load_term(450, 10_000, 0.01), 2.0);
    }

    #[test]
    fn stale_repository_keeps_only_indicator_points() {
        let mut snapshot = empty_snapshot();
        assert_eq!(maintenance_score(&snapshot, DEFAULT_EXPECTED_ISSUE_RATIO), 12.0);

        snapshot.open_issues_count = 50;
        assert_eq!(maintenance_score(&snapshot, DEFAULT_EXPECTED_ISSUE_RATIO), 2.0);

        snapshot.license_name = Some("MIT".to_string());
        snapshot.description = Some("useful".to_string());
        assert_eq!(maintenance_score(&snapshot, DEFAULT_EXPECTED_ISSUE_RATIO), 5.0);
    }

    #[test]
    fn archived_and_blank_description_lose_indicator_points() {
        let mut snapshot = empty_snapshot();
        snapshot.open_issues_count = 50;
        snapshot.archived = true;
        snapshot.description = Some("   ".to_string());
        assert_eq!(maintenance_score(&snapshot, DEFAULT_EXPECTED_ISSUE_RATIO), 0.0);
    }

    #[test]
    fn recency_is_measured_from_capture_time() {
        let mut snapshot = empty_snapshot();
        snapshot.open_issues_count = 50;
        snapshot.updated_at = snapshot.fetched_at - Duration::days(3);
        assert_eq!(maintenance_score(&snapshot, DEFAULT_EXPECTED_ISSUE_RATIO), 12.0);

        snapshot.updated_at = snapshot.fetched_at + Duration::hours(2);
        assert_eq!(maintenance_score(&snapshot, DEFAULT_EXPECTED_ISSUE_RATIO), 12.0);
    }
}
