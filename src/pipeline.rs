//! The scoring pipeline: baseline, semantic overlay, global sync, radar.
//!
//! Each call to [`RiskPipeline::assess`] builds a fresh score map and threads
//! it by value through the stages in dependency order:
//! 1. Baseline - keyword hits from the raw text (no analysis needed)
//! 2. Overlay - clause boosts (needs the completed analysis)
//! 3. Sync - headline reconciliation (needs the completed analysis)
//!
//! The pipeline holds no per-request state, so one instance can serve any
//! number of independent requests.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::analysis::AnalysisResult;
use crate::baseline::{BaselineScorer, NoiseSource};
use crate::category::RiskCategory;
use crate::config::ScoringConfig;
use crate::overlay::{AppliedBoost, SemanticOverlay};
use crate::radar::{RadarProjector, RadarSeries};
use crate::scores::{CategoryScores, ScoreSource, ScoredCategory};
use crate::sync::{GlobalSyncReconciler, SyncOutcome};

/// Everything one assessment produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Final category scores
    pub scores: CategoryScores,
    /// Final scores with the stage that produced each one
    pub categories: Vec<ScoredCategory>,
    /// Clause boosts that raised a score, in clause order
    pub boosts: Vec<AppliedBoost>,
    /// What the global sync changed, if it ran
    pub sync: Option<SyncOutcome>,
    pub radar: RadarSeries,
}

impl RiskAssessment {
    /// The highest category score.
    pub fn peak(&self) -> u32 {
        self.scores.max()
    }

    /// Final score and provenance for one category.
    pub fn category(&self, category: RiskCategory) -> &ScoredCategory {
        &self.categories[category.index()]
    }
}

/// Runs the scoring stages with one configuration.
#[derive(Debug, Clone)]
pub struct RiskPipeline {
    baseline: BaselineScorer,
    overlay: SemanticOverlay,
    sync: GlobalSyncReconciler,
    projector: RadarProjector,
}

impl Default for RiskPipeline {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl RiskPipeline {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            baseline: BaselineScorer::new(config),
            overlay: SemanticOverlay::new(config),
            sync: GlobalSyncReconciler::new(config),
            projector: RadarProjector,
        }
    }

    pub fn baseline(&self) -> &BaselineScorer {
        &self.baseline
    }

    /// Score `text`, optionally refined by `analysis`.
    pub fn assess(
        &self,
        text: &str,
        analysis: Option<&AnalysisResult>,
        noise: &mut dyn NoiseSource,
    ) -> RiskAssessment {
        let _span = debug_span!(
            "assess",
            text_len = text.len(),
            has_analysis = analysis.is_some()
        )
        .entered();

        let report = self.baseline.compute_report(text, noise);
        let mut sources = report.sources;

        let (scores, boosts) = self.overlay.apply_with_trace(report.scores, analysis);
        for boost in &boosts {
            sources[boost.category.index()] = ScoreSource::SemanticOverlay {
                clause_index: boost.clause_index,
                clause_type: boost.clause_type.clone(),
                level: boost.level,
            };
        }

        let (scores, sync) = self.sync.reconcile_with_trace(scores, analysis);
        if let Some(outcome) = &sync {
            for category in outcome.changed() {
                sources[category.index()] = ScoreSource::GlobalSync {
                    target: outcome.target,
                };
            }
        }

        let categories = scores
            .iter()
            .zip(sources)
            .map(|((category, value), source)| ScoredCategory {
                category,
                value,
                source,
            })
            .collect();

        let radar = self.projector.project(&scores);
        debug!(peak = scores.max(), boosts = boosts.len(), "assessment complete");

        RiskAssessment {
            scores,
            categories,
            boosts,
            sync,
            radar,
        }
    }

    /// [`RiskPipeline::assess`] with the thread-local random generator as
    /// the noise source.
    pub fn assess_with_thread_rng(
        &self,
        text: &str,
        analysis: Option<&AnalysisResult>,
    ) -> RiskAssessment {
        let mut rng = rand::thread_rng();
        self.assess(text, analysis, &mut rng)
    }
}
