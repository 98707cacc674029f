use serde::{Deserialize, Serialize};

pub type Score = f64;

/// Ceiling for every sub-score.
pub const SUB_SCORE_MAX: Score = 25.0;
/// Ceiling for the aggregate.
pub const TOTAL_SCORE_MAX: Score = 100.0;

pub const ACTIVITY_WEIGHT: f64 = 0.25;
pub const POPULARITY_WEIGHT: f64 = 0.25;
pub const COMMUNITY_WEIGHT: f64 = 0.25;
pub const MAINTENANCE_WEIGHT: f64 = 0.25;

/// Four sub-scores share one 0-100 scale, so each weight is multiplied by
/// the number of components before it is applied.
const COMPONENT_COUNT: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub activity: f64,
    pub popularity: f64,
    pub community: f64,
    pub maintenance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            activity: ACTIVITY_WEIGHT,
            popularity: POPULARITY_WEIGHT,
            community: COMMUNITY_WEIGHT,
            maintenance: MAINTENANCE_WEIGHT,
        }
    }
}

impl ScoreWeights {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.activity,
            self.popularity,
            self.community,
            self.maintenance,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub activity_score: Score,
    pub popularity_score: Score,
    pub community_score: Score,
    pub maintenance_score: Score,
    pub total_score: Score,
}

impl HealthScore {
    /// Clamps each component to `[0, 25]` and derives the weighted total.
    pub fn new(
        activity: Score,
        popularity: Score,
        community: Score,
        maintenance: Score,
        weights: &ScoreWeights,
    ) -> Self {
        let activity_score = clamp_sub_score(activity);
        let popularity_score = clamp_sub_score(popularity);
        let community_score = clamp_sub_score(community);
        let maintenance_score = clamp_sub_score(maintenance);

        let total = activity_score * weights.activity * COMPONENT_COUNT
            + popularity_score * weights.popularity * COMPONENT_COUNT
            + community_score * weights.community * COMPONENT_COUNT
            + maintenance_score * weights.maintenance * COMPONENT_COUNT;

        Self {
            activity_score,
            popularity_score,
            community_score,
            maintenance_score,
            total_score: total.clamp(0.0, TOTAL_SCORE_MAX),
        }
    }

    pub fn grade(&self) -> HealthGrade {
        HealthGrade::from_total(self.total_score)
    }

    pub fn components(&self) -> [(&'static str, Score); 4] {
        [
            ("activity", self.activity_score),
            ("popularity", self.popularity_score),
            ("community", self.community_score),
            ("maintenance", self.maintenance_score),
        ]
    }
}

fn clamp_sub_score(value: Score) -> Score {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, SUB_SCORE_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthGrade {
    pub fn from_total(total: Score) -> Self {
        if total >= 80.0 {
            HealthGrade::Excellent
        } else if total >= 60.0 {
            HealthGrade::Good
        } else if total >= 40.0 {
            HealthGrade::Fair
        } else {
            HealthGrade::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthGrade::Excellent => "Excellent",
            HealthGrade::Good => "Good",
            HealthGrade::Fair => "Fair",
            HealthGrade::Poor => "Poor",
        }
    }
}
