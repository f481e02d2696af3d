//! Scoring configuration.
//!
//! Every constant the engine uses lives here so deployments can tune them
//! from a TOML file:
//!
//! ```toml
//! keyword_weight = 5
//! baseline_cap = 50
//! noise_floor_min = 5
//! noise_floor_max = 20
//!
//! [extra_keywords]
//! Compliance = ["hipaa"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::RiskCategory;
use crate::errors::{RiskError, RiskResult};
use crate::scores::MAX_SCORE;

/// Tunable constants for the scoring pipeline and the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points per keyword hit.
    pub keyword_weight: u32,
    /// Highest score the keyword baseline may produce. Everything above is
    /// reserved for the semantic and sync stages.
    pub baseline_cap: u32,
    /// Lowest noise-floor value, inclusive.
    pub noise_floor_min: u32,
    /// Highest noise-floor value, inclusive.
    pub noise_floor_max: u32,
    /// Floor applied to a category when a High-risk clause maps to it.
    pub high_boost: u32,
    /// Floor applied to a category when a Medium-risk clause maps to it.
    pub medium_boost: u32,
    /// Categories at or below this value are not inflated by the global sync.
    pub sync_threshold: u32,
    /// Headline scores strictly above this are reported as high risk.
    pub high_risk_threshold: u32,
    /// Headline shown when an analysis exists but carries no score.
    pub default_headline: u32,
    /// Additional trigger terms appended to the standard index, keyed by
    /// category label.
    pub extra_keywords: BTreeMap<String, Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 5,
            baseline_cap: 50,
            noise_floor_min: 5,
            noise_floor_max: 20,
            high_boost: 85,
            medium_boost: 60,
            sync_threshold: 30,
            high_risk_threshold: 75,
            default_headline: 50,
            extra_keywords: BTreeMap::new(),
        }
    }
}

impl ScoringConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> RiskResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| RiskError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            RiskError::ConfigInvalid { message } => RiskError::Config {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> RiskResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| RiskError::ConfigInvalid {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scoring stages cannot honour.
    pub fn validate(&self) -> RiskResult<()> {
        for (name, value) in [
            ("keyword_weight", self.keyword_weight),
            ("noise_floor_min", self.noise_floor_min),
        ] {
            if value == 0 {
                return Err(RiskError::ConfigInvalid {
                    message: format!("{} must be positive", name),
                });
            }
        }
        if self.noise_floor_min > self.noise_floor_max {
            return Err(RiskError::ConfigInvalid {
                message: format!(
                    "noise floor range is inverted: {} > {}",
                    self.noise_floor_min, self.noise_floor_max
                ),
            });
        }
        let bounded = [
            ("baseline_cap", self.baseline_cap),
            ("noise_floor_max", self.noise_floor_max),
            ("high_boost", self.high_boost),
            ("medium_boost", self.medium_boost),
            ("sync_threshold", self.sync_threshold),
            ("high_risk_threshold", self.high_risk_threshold),
            ("default_headline", self.default_headline),
        ];
        for (name, value) in bounded {
            if value > MAX_SCORE {
                return Err(RiskError::ConfigInvalid {
                    message: format!("{} must be at most {}, got {}", name, MAX_SCORE, value),
                });
            }
        }
        if self.baseline_cap < self.noise_floor_max {
            return Err(RiskError::ConfigInvalid {
                message: format!(
                    "baseline_cap {} is below noise_floor_max {}",
                    self.baseline_cap, self.noise_floor_max
                ),
            });
        }
        for name in self.extra_keywords.keys() {
            if RiskCategory::from_name(name).is_none() {
                return Err(RiskError::ConfigInvalid {
                    message: format!("unknown risk category in extra_keywords: {:?}", name),
                });
            }
        }
        Ok(())
    }

    /// Extra keywords resolved to their categories. Unknown labels are
    /// skipped; [`ScoringConfig::validate`] reports them.
    pub fn extra_keywords_by_category(&self) -> BTreeMap<RiskCategory, Vec<String>> {
        let mut resolved: BTreeMap<RiskCategory, Vec<String>> = BTreeMap::new();
        for (name, terms) in &self.extra_keywords {
            if let Some(category) = RiskCategory::from_name(name) {
                resolved
                    .entry(category)
                    .or_default()
                    .extend(terms.iter().cloned());
            }
        }
        resolved
    }
}
