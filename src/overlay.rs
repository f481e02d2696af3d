//! Semantic overlay: lets the clause-level analysis lift category scores
//! above the keyword baseline.
//!
//! Clause types are free text from the model ("Indemnity", "Payment/Rent",
//! "Non-Compete Clause", ...). They are classified by the first entry of an
//! ordered substring table, so order matters: "Penalty for Termination"
//! lands in Financial because `penalty` is listed before `termination`.
//! The `ip` entry is deliberately loose and also fires inside words such as
//! "Relationship" or "Shipping".

use serde::Serialize;
use tracing::debug;

use crate::analysis::{AnalysisResult, RiskLevel};
use crate::category::RiskCategory;
use crate::config::ScoringConfig;
use crate::scores::CategoryScores;

/// Ordered `(type substring, category)` table; the first match wins.
pub const CLAUSE_TYPE_TABLE: [(&str, RiskCategory); 9] = [
    ("indemnity", RiskCategory::Financial),
    ("penalty", RiskCategory::Financial),
    ("jurisdiction", RiskCategory::Legal),
    ("arbitration", RiskCategory::Legal),
    ("litigation", RiskCategory::Legal),
    ("termination", RiskCategory::Termination),
    ("non-compete", RiskCategory::Operational),
    ("ip", RiskCategory::Operational),
    ("audit", RiskCategory::Compliance),
];

/// Map a free-text clause type to a category, if any table entry matches.
pub fn classify_clause_type(clause_type: &str) -> Option<RiskCategory> {
    let lower = clause_type.to_lowercase();
    CLAUSE_TYPE_TABLE
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, category)| *category)
}

/// A clause that actually raised a category score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedBoost {
    /// Zero-based position of the clause in the analysis
    pub clause_index: usize,
    pub clause_type: String,
    pub category: RiskCategory,
    pub level: RiskLevel,
    /// Score before the boost
    pub from: u32,
    /// Score after the boost
    pub to: u32,
}

/// Raises category floors for High and Medium clauses.
#[derive(Debug, Clone, Copy)]
pub struct SemanticOverlay {
    high_boost: u32,
    medium_boost: u32,
}

impl Default for SemanticOverlay {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl SemanticOverlay {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            high_boost: config.high_boost,
            medium_boost: config.medium_boost,
        }
    }

    /// Floor a clause of `level` imposes on its category, if any.
    pub fn boost_for(&self, level: RiskLevel) -> Option<u32> {
        match level {
            RiskLevel::High => Some(self.high_boost),
            RiskLevel::Medium => Some(self.medium_boost),
            RiskLevel::Low => None,
        }
    }

    /// Apply every clause boost. No-op without an analysis or clause list.
    pub fn apply_overlay(
        &self,
        scores: CategoryScores,
        analysis: Option<&AnalysisResult>,
    ) -> CategoryScores {
        self.apply_with_trace(scores, analysis).0
    }

    /// Like [`SemanticOverlay::apply_overlay`], also returning the boosts
    /// that changed a score, in clause order.
    pub fn apply_with_trace(
        &self,
        mut scores: CategoryScores,
        analysis: Option<&AnalysisResult>,
    ) -> (CategoryScores, Vec<AppliedBoost>) {
        let mut applied = Vec::new();

        let clauses = match analysis.and_then(|a| a.clauses.as_deref()) {
            Some(clauses) => clauses,
            None => return (scores, applied),
        };

        for (clause_index, clause) in clauses.iter().enumerate() {
            let category = match classify_clause_type(&clause.clause_type) {
                Some(category) => category,
                None => continue,
            };
            let floor = match self.boost_for(clause.risk_level) {
                Some(floor) => floor,
                None => continue,
            };

            // raise_to only ever increases, so later clauses cannot undo an
            // earlier, larger boost.
            if let Some(from) = scores.raise_to(category, floor) {
                let to = scores.get(category);
                debug!(
                    clause_index,
                    clause_type = %clause.clause_type,
                    %category,
                    from,
                    to,
                    "clause boost"
                );
                applied.push(AppliedBoost {
                    clause_index,
                    clause_type: clause.clause_type.clone(),
                    category,
                    level: clause.risk_level,
                    from,
                    to,
                });
            }
        }

        (scores, applied)
    }
}
