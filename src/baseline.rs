//! Keyword-frequency baseline.
//!
//! Each category's baseline is `hits * keyword_weight`, capped at
//! `baseline_cap` (50 by default). Keyword noise alone can therefore never
//! reach the high band; only the clause analysis and the global sync can.
//!
//! A category with zero hits gets a random value from the noise floor range
//! instead of a literal zero, so no axis of the radar collapses to the
//! centre. The random source is injected through [`NoiseSource`].

use rand::Rng;
use tracing::debug;

use crate::category::RiskCategory;
use crate::config::ScoringConfig;
use crate::keyword_index::KeywordRiskIndex;
use crate::scores::{CategoryScores, ScoreSource};

/// Supplies noise-floor values for categories with no keyword hits.
pub trait NoiseSource {
    /// A value in `low..=high`.
    fn noise_floor(&mut self, low: u32, high: u32) -> u32;
}

impl<R: Rng> NoiseSource for R {
    fn noise_floor(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}

/// Always returns the same value, clamped into the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedNoise(pub u32);

impl NoiseSource for FixedNoise {
    fn noise_floor(&mut self, low: u32, high: u32) -> u32 {
        self.0.clamp(low, high)
    }
}

/// Baseline scores together with where each one came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineReport {
    pub scores: CategoryScores,
    pub sources: [ScoreSource; RiskCategory::COUNT],
}

/// Computes keyword baselines from raw contract text.
#[derive(Debug, Clone)]
pub struct BaselineScorer {
    index: KeywordRiskIndex,
    weight: u32,
    cap: u32,
    noise_min: u32,
    noise_max: u32,
}

impl Default for BaselineScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl BaselineScorer {
    /// Scorer over the standard index plus any configured extra keywords.
    pub fn new(config: &ScoringConfig) -> Self {
        let extra = config.extra_keywords_by_category();
        let index = if extra.is_empty() {
            KeywordRiskIndex::standard().clone()
        } else {
            KeywordRiskIndex::standard().with_extra_keywords(&extra)
        };
        Self::with_index(index, config)
    }

    /// Scorer over a caller-supplied index.
    pub fn with_index(index: KeywordRiskIndex, config: &ScoringConfig) -> Self {
        Self {
            index,
            weight: config.keyword_weight,
            cap: config.baseline_cap,
            noise_min: config.noise_floor_min.min(config.noise_floor_max),
            noise_max: config.noise_floor_max,
        }
    }

    pub fn index(&self) -> &KeywordRiskIndex {
        &self.index
    }

    /// Baseline score per category.
    pub fn compute_baseline(&self, text: &str, noise: &mut dyn NoiseSource) -> CategoryScores {
        self.compute_report(text, noise).scores
    }

    /// Baseline score per category with provenance.
    pub fn compute_report(&self, text: &str, noise: &mut dyn NoiseSource) -> BaselineReport {
        let text_lower = text.to_lowercase();
        let mut scores = CategoryScores::default();
        let mut sources: [ScoreSource; RiskCategory::COUNT] =
            std::array::from_fn(|_| ScoreSource::NoiseFloor);

        for category in RiskCategory::ALL {
            let hits = self.index.count_hits(category, &text_lower);
            let weighted = u32::try_from(hits)
                .unwrap_or(u32::MAX)
                .saturating_mul(self.weight)
                .min(self.cap);

            if weighted == 0 {
                let floor = noise.noise_floor(self.noise_min, self.noise_max);
                debug!(%category, floor, "no keyword hits, using noise floor");
                scores.set(category, floor);
                sources[category.index()] = ScoreSource::NoiseFloor;
            } else {
                debug!(%category, hits, score = weighted, "keyword baseline");
                scores.set(category, weighted);
                sources[category.index()] = ScoreSource::KeywordBaseline { hits };
            }
        }

        BaselineReport { scores, sources }
    }
}
