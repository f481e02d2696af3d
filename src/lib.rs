//! Hybrid risk scoring for contract documents.
//!
//! This crate turns contract text, plus an optional structured analysis from
//! an external language model, into a five-axis risk radar:
//!
//! ## Scoring Stages
//!
//! - [`BaselineScorer`] - Keyword hits per category, capped at the medium band
//! - [`SemanticOverlay`] - Raises categories flagged by High/Medium clauses
//! - [`GlobalSyncReconciler`] - Keeps the radar consistent with the headline score
//! - [`RadarProjector`] - Ordered `(category, value)` series on a `0..=100` axis
//!
//! [`RiskPipeline`] runs the stages in order and records where each final
//! value came from.
//!
//! ## Ingestion and Presentation
//!
//! - [`AnalysisResult`] - Tolerant parsing of the model's reply
//! - [`DashboardSummary`] - Headline score, verdict and clause cards
//! - [`AssessmentDisplay`] - Plain-text report
//!
//! ## Example
//!
//! ```
//! use risk_radar::{AnalysisResult, FixedNoise, RiskCategory, RiskPipeline};
//!
//! let analysis = AnalysisResult::parse_or_fallback(
//!     r#"{"risk_score": 80, "clauses": [{"type": "Indemnity", "risk_level": "High"}]}"#,
//! );
//! let assessment = RiskPipeline::default().assess(
//!     "The Vendor shall indemnify the Company.",
//!     Some(&analysis),
//!     &mut FixedNoise(10),
//! );
//!
//! assert_eq!(assessment.scores.get(RiskCategory::Financial), 85);
//! assert_eq!(assessment.radar.len(), 5);
//! ```

mod analysis;
mod baseline;
mod category;
mod config;
mod dashboard;
mod display;
mod errors;
mod keyword_index;
mod overlay;
mod pipeline;
mod radar;
mod scores;
mod sync;

pub use analysis::{
    AnalysisResult, ClauseRecord, RiskLevel, FALLBACK_RISK_SCORE, FALLBACK_SUMMARY,
};
pub use baseline::{BaselineReport, BaselineScorer, FixedNoise, NoiseSource};
pub use category::RiskCategory;
pub use config::ScoringConfig;
pub use dashboard::{
    approx_clause_count, headline_score, ClauseCard, DashboardSummary, RiskColor, Verdict,
};
pub use display::AssessmentDisplay;
pub use errors::{RiskError, RiskResult};
pub use keyword_index::KeywordRiskIndex;
pub use overlay::{classify_clause_type, AppliedBoost, SemanticOverlay, CLAUSE_TYPE_TABLE};
pub use pipeline::{RiskAssessment, RiskPipeline};
pub use radar::{RadarProjector, RadarSeries};
pub use scores::{CategoryScores, ScoreSource, ScoredCategory, MAX_SCORE};
pub use sync::{GlobalSyncReconciler, SyncOutcome};
