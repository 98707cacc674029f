use super::log_term;
use crate::types::scoring::{Score, SUB_SCORE_MAX};
use crate::types::snapshot::RepositorySnapshot;

pub fn popularity_score(snapshot: &RepositorySnapshot) -> Score {
    let stars = log_term(snapshot.stargazers_count, 1.5, 15.0);
    let forks = log_term(snapshot.forks_count, 1.2, 6.0);
    let watchers = log_term(snapshot.watchers_count, 0.8, 4.0);
    (stars + forks + watchers).clamp(0.0, SUB_SCORE_MAX)
}
