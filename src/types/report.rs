use crate::types::scoring::{HealthGrade, HealthScore, Score};
use crate::types::snapshot::RepositorySnapshot;
use serde::{Deserialize, Serialize};

/// Differences smaller than this count as a tie.
pub const TIE_TOLERANCE: Score = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub snapshot: RepositorySnapshot,
    pub score: HealthScore,
    pub grade: HealthGrade,
}

impl AnalysisReport {
    pub fn new(snapshot: RepositorySnapshot, score: HealthScore) -> Self {
        Self {
            grade: score.grade(),
            snapshot,
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    Left,
    Right,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDelta {
    pub component: String,
    pub left: Score,
    pub right: Score,
    /// `right - left`.
    pub delta: Score,
    pub leader: Leader,
}

impl ComponentDelta {
    pub fn new(component: &str, left: Score, right: Score) -> Self {
        let delta = right - left;
        let leader = if delta.abs() < TIE_TOLERANCE {
            Leader::Tie
        } else if delta > 0.0 {
            Leader::Right
        } else {
            Leader::Left
        };
        Self {
            component: component.to_string(),
            left,
            right,
            delta,
            leader,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub left: AnalysisReport,
    pub right: AnalysisReport,
    pub deltas: Vec<ComponentDelta>,
}

impl Comparison {
    pub fn new(left: AnalysisReport, right: AnalysisReport) -> Self {
        let mut deltas = left
            .score
            .components()
            .iter()
            .zip(right.score.components().iter())
            .map(|((name, l), (_, r))| ComponentDelta::new(name, *l, *r))
            .collect::<Vec<_>>();
        deltas.push(ComponentDelta::new(
            "total",
            left.score.total_score,
            right.score.total_score,
        ));
        Self {
            left,
            right,
            deltas,
        }
    }

    pub fn overall_leader(&self) -> Leader {
        self.deltas
            .iter()
            .find(|delta| delta.component == "total")
            .map(|delta| delta.leader)
            .unwrap_or(Leader::Tie)
    }
}
