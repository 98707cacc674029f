use crate::error::HealthError;
use crate::types::scoring::ScoreWeights;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RECENT_DAYS: u32 = 30;
pub const DEFAULT_EXPECTED_ISSUE_RATIO: f64 = 0.01;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthConfig {
    pub api: Option<ApiConfig>,
    pub window: Option<WindowConfig>,
    pub weights: Option<WeightsConfig>,
    pub maintenance: Option<MaintenanceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    pub recent_days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    pub activity: Option<f64>,
    pub popularity: Option<f64>,
    pub community: Option<f64>,
    pub maintenance: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceConfig {
    pub expected_issue_ratio: Option<f64>,
}

/// Knobs the scorer reads. Everything else about scoring is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringSettings {
    pub weights: ScoreWeights,
    pub expected_issue_ratio: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            expected_issue_ratio: DEFAULT_EXPECTED_ISSUE_RATIO,
        }
    }
}

impl HealthConfig {
    pub fn base_url(&self) -> String {
        self.api
            .as_ref()
            .and_then(|api| api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn host(&self) -> String {
        self.api
            .as_ref()
            .and_then(|api| api.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn timeout(&self) -> Duration {
        let secs = self
            .api
            .as_ref()
            .and_then(|api| api.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn user_agent(&self) -> String {
        self.api
            .as_ref()
            .and_then(|api| api.user_agent.clone())
            .unwrap_or_else(|| format!("repohealth/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn recent_days(&self) -> u32 {
        self.window
            .as_ref()
            .and_then(|window| window.recent_days)
            .unwrap_or(DEFAULT_RECENT_DAYS)
    }

    pub fn weights(&self) -> ScoreWeights {
        let defaults = ScoreWeights::default();
        match &self.weights {
            Some(weights) => ScoreWeights {
                activity: weights.activity.unwrap_or(defaults.activity),
                popularity: weights.popularity.unwrap_or(defaults.popularity),
                community: weights.community.unwrap_or(defaults.community),
                maintenance: weights.maintenance.unwrap_or(defaults.maintenance),
            },
            None => defaults,
        }
    }

    pub fn expected_issue_ratio(&self) -> f64 {
        self.maintenance
            .as_ref()
            .and_then(|maintenance| maintenance.expected_issue_ratio)
            .unwrap_or(DEFAULT_EXPECTED_ISSUE_RATIO)
    }

    pub fn scoring(&self) -> ScoringSettings {
        ScoringSettings {
            weights: self.weights(),
            expected_issue_ratio: self.expected_issue_ratio(),
        }
    }

    pub fn validate(&self) -> Result<(), HealthError> {
        let weights = self.weights().as_array();
        if weights.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
            return Err(HealthError::ConfigParse(
                "weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum: f64 = weights.iter().sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(HealthError::ConfigParse(format!(
                "weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if let Some(api) = &self.api {
            if api.timeout_secs == Some(0) {
                return Err(HealthError::ConfigParse(
                    "api.timeout_secs must be greater than 0".to_string(),
                ));
            }
            if let Some(base_url) = &api.base_url {
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(HealthError::ConfigParse(format!(
                        "api.base_url must be an http(s) URL: {base_url}"
                    )));
                }
            }
            if api.host.as_deref().map(str::trim) == Some("") {
                return Err(HealthError::ConfigParse(
                    "api.host cannot be empty".to_string(),
                ));
            }
        }

        if !(1..=365).contains(&self.recent_days()) {
            return Err(HealthError::ConfigParse(
                "window.recent_days must be between 1 and 365".to_string(),
            ));
        }

        let ratio = self.expected_issue_ratio();
        if ratio.is_nan() || ratio <= 0.0 {
            return Err(HealthError::ConfigParse(
                "maintenance.expected_issue_ratio must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
