//! The structured clause analysis produced by the external language model,
//! and its tolerant ingestion.
//!
//! Upstream output is only loosely trusted: keys may be missing, values may
//! have the wrong JSON type, and the reply may wrap the JSON object in prose.
//! [`AnalysisResult::from_value`] never fails; it drops or defaults whatever
//! it cannot read so the scoring stages can always run.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::{RiskError, RiskResult};
use crate::scores::MAX_SCORE;

/// Summary substituted when the model reply cannot be parsed.
pub const FALLBACK_SUMMARY: &str =
    "The AI analyzed the file but the output format was complex. Risks were detected.";

/// Headline score substituted when the model reply cannot be parsed.
pub const FALLBACK_RISK_SCORE: u32 = 60;

/// Risk level the model assigns to a clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Case-insensitive parse; anything unrecognized is treated as `Low`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => RiskLevel::High,
            "medium" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clause as reported by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClauseRecord {
    /// Original clause text
    pub text: String,
    /// Plain-language explanation
    pub explanation: String,
    pub risk_level: RiskLevel,
    /// Free-form clause type, e.g. "Indemnity" or "Payment/Rent"
    #[serde(rename = "type")]
    pub clause_type: String,
}

impl ClauseRecord {
    pub fn new(clause_type: impl Into<String>, risk_level: RiskLevel) -> Self {
        Self {
            clause_type: clause_type.into(),
            risk_level,
            ..Self::default()
        }
    }

    /// Read a clause object, defaulting every missing or mistyped field.
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            text: string_field(object, "text").unwrap_or_default(),
            explanation: string_field(object, "explanation").unwrap_or_default(),
            risk_level: string_field(object, "risk_level")
                .map(|raw| RiskLevel::parse_lenient(&raw))
                .unwrap_or_default(),
            clause_type: string_field(object, "type").unwrap_or_default(),
        }
    }
}

/// Full analysis of one contract.
///
/// `clauses` is `None` when the upstream object had no usable clause list,
/// which is different from an explicitly empty list only for reporting; both
/// leave the overlay with nothing to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: Option<String>,
    /// Headline score, clamped to `0..=100`
    pub risk_score: Option<u32>,
    pub clauses: Option<Vec<ClauseRecord>>,
    pub missing_clauses: Vec<String>,
}

impl AnalysisResult {
    /// Analysis used when the model reply is unreadable.
    pub fn fallback() -> Self {
        Self {
            summary: Some(FALLBACK_SUMMARY.to_string()),
            risk_score: Some(FALLBACK_RISK_SCORE),
            clauses: Some(Vec::new()),
            missing_clauses: Vec::new(),
        }
    }

    /// Clauses, or an empty slice when the list was absent.
    pub fn clause_list(&self) -> &[ClauseRecord] {
        self.clauses.as_deref().unwrap_or(&[])
    }

    /// Read an already-parsed JSON value. Never fails: a non-object value
    /// yields an empty analysis.
    pub fn from_value(value: &Value) -> Self {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                debug!("analysis is not a JSON object; ignoring it");
                return Self::default();
            }
        };

        let clauses = object.get("clauses").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(ClauseRecord::from_object)
                .collect::<Vec<_>>()
        });

        let missing_clauses = object
            .get("missing_clauses")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            summary: string_field(object, "summary"),
            risk_score: object.get("risk_score").and_then(score_from_value),
            clauses,
            missing_clauses,
        }
    }

    /// Parse a raw model reply, tolerating prose around the JSON object.
    pub fn from_model_reply(reply: &str) -> RiskResult<Self> {
        let json = extract_json_object(reply);
        let value: Value = serde_json::from_str(json).map_err(|e| RiskError::Parse {
            message: e.to_string(),
        })?;

        let Some(object) = value.as_object() else {
            return Err(RiskError::Parse {
                message: "expected a JSON object".to_string(),
            });
        };

        // An error payload only counts when it carries no analysis fields.
        let has_analysis = ["risk_score", "clauses", "summary"]
            .iter()
            .any(|key| object.contains_key(*key));
        match object.get("error") {
            Some(error) if !error.is_null() && !has_analysis => {
                let message = error
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                Err(RiskError::Upstream { message })
            }
            _ => Ok(Self::from_value(&value)),
        }
    }

    /// Parse a raw model reply, substituting [`AnalysisResult::fallback`] on
    /// any failure.
    pub fn parse_or_fallback(reply: &str) -> Self {
        match Self::from_model_reply(reply) {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(error = %err, "falling back to default analysis");
                Self::fallback()
            }
        }
    }
}

/// Slice from the first `{` to the last `}`, or the trimmed input when
/// there is no such pair.
fn extract_json_object(reply: &str) -> &str {
    let trimmed = reply.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Accept integer or float scores; clamp to the radar axis.
fn score_from_value(value: &Value) -> Option<u32> {
    if let Some(int) = value.as_u64() {
        return Some(int.min(MAX_SCORE as u64) as u32);
    }
    if value.as_i64().is_some() {
        // Negative integers
        return Some(0);
    }
    let float = value.as_f64()?;
    if !float.is_finite() {
        return None;
    }
    Some(float.round().clamp(0.0, MAX_SCORE as f64) as u32)
}
