//! Headline figures shown above the radar and the per-clause cards of the
//! detailed analysis view.

use serde::Serialize;

use crate::analysis::{AnalysisResult, ClauseRecord, RiskLevel};
use crate::config::ScoringConfig;

/// Overall verdict for the headline score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    HighRisk,
    Safe,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::HighRisk => "High Risk",
            Verdict::Safe => "Safe",
        }
    }
}

/// Display colour for a clause's risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Red,
    Orange,
    Green,
}

impl From<RiskLevel> for RiskColor {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => RiskColor::Red,
            RiskLevel::Medium => RiskColor::Orange,
            RiskLevel::Low => RiskColor::Green,
        }
    }
}

/// One clause as presented in the detailed analysis view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseCard {
    /// One-based position
    pub number: usize,
    pub clause_type: String,
    pub level: RiskLevel,
    pub color: RiskColor,
    pub text: String,
    pub explanation: String,
    /// High and Medium clauses can be sent to the negotiation drafter
    pub negotiable: bool,
    /// Issue description handed to the negotiation drafter
    pub negotiation_context: Option<String>,
}

impl ClauseCard {
    fn from_record(index: usize, record: &ClauseRecord) -> Self {
        let clause_type = if record.clause_type.is_empty() {
            "Standard".to_string()
        } else {
            record.clause_type.clone()
        };
        let negotiable = matches!(record.risk_level, RiskLevel::High | RiskLevel::Medium);
        let negotiation_context = negotiable
            .then(|| format!("The user considers this {} clause too risky.", clause_type));

        Self {
            number: index + 1,
            level: record.risk_level,
            color: RiskColor::from(record.risk_level),
            text: record.text.clone(),
            explanation: record.explanation.clone(),
            negotiable,
            negotiation_context,
            clause_type,
        }
    }
}

/// Figures for the contract health dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Overall score out of 100
    pub headline_score: u32,
    pub verdict: Verdict,
    /// Rough clause count derived from sentence punctuation
    pub approx_clause_count: usize,
    pub executive_summary: Option<String>,
    pub clauses: Vec<ClauseCard>,
    pub missing_clauses: Vec<String>,
}

impl DashboardSummary {
    pub fn build(text: &str, analysis: Option<&AnalysisResult>, config: &ScoringConfig) -> Self {
        let headline_score = headline_score(analysis, config);
        let verdict = if headline_score > config.high_risk_threshold {
            Verdict::HighRisk
        } else {
            Verdict::Safe
        };

        let clauses = analysis
            .map(|a| {
                a.clause_list()
                    .iter()
                    .enumerate()
                    .map(|(index, record)| ClauseCard::from_record(index, record))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            headline_score,
            verdict,
            approx_clause_count: approx_clause_count(text),
            executive_summary: analysis.and_then(|a| a.summary.clone()),
            clauses,
            missing_clauses: analysis
                .map(|a| a.missing_clauses.clone())
                .unwrap_or_default(),
        }
    }

    /// Cards the user can negotiate.
    pub fn negotiable_clauses(&self) -> impl Iterator<Item = &ClauseCard> {
        self.clauses.iter().filter(|card| card.negotiable)
    }
}

/// 0 without an analysis, the configured default when the analysis has no
/// score, otherwise the analysis score.
pub fn headline_score(analysis: Option<&AnalysisResult>, config: &ScoringConfig) -> u32 {
    match analysis {
        None => 0,
        Some(a) => a.risk_score.unwrap_or(config.default_headline),
    }
}

/// Half the number of '.'-separated pieces, empty pieces included.
pub fn approx_clause_count(text: &str) -> usize {
    text.split('.').count() / 2
}
