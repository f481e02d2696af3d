//! The per-category score map threaded through the scoring stages, and the
//! provenance attached to each final value.
//!
//! [`CategoryScores`] is a fixed table with one slot per [`RiskCategory`], so
//! every category always has an entry and the map can never be empty.
//! Every write goes through [`CategoryScores::set`], which clamps to
//! `0..=MAX_SCORE`.
//!
//! [`ScoreSource`] records which stage produced a category's current value:
//! - the keyword baseline (with its raw hit count)
//! - the anti-zero noise floor
//! - a semantic overlay boost from a specific clause
//! - the global sync against the headline score

use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::analysis::RiskLevel;
use crate::category::RiskCategory;

/// Upper bound of the radar's radial axis.
pub const MAX_SCORE: u32 = 100;

/// Mapping from every [`RiskCategory`] to a score in `0..=100`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryScores {
    values: [u32; RiskCategory::COUNT],
}

impl CategoryScores {
    /// Build from values listed in category declaration order.
    pub fn new(values: [u32; RiskCategory::COUNT]) -> Self {
        let mut scores = Self::default();
        for (category, value) in RiskCategory::ALL.iter().zip(values) {
            scores.set(*category, value);
        }
        scores
    }

    /// Builder-style setter, handy for assembling fixtures.
    pub fn with(mut self, category: RiskCategory, value: u32) -> Self {
        self.set(category, value);
        self
    }

    /// Current value for `category`.
    pub fn get(&self, category: RiskCategory) -> u32 {
        self.values[category.index()]
    }

    /// Overwrite the value for `category`, clamped to `0..=MAX_SCORE`.
    pub fn set(&mut self, category: RiskCategory, value: u32) {
        self.values[category.index()] = value.min(MAX_SCORE);
    }

    /// Raise `category` to at least `floor`. Returns the previous value when
    /// the score actually changed.
    pub fn raise_to(&mut self, category: RiskCategory, floor: u32) -> Option<u32> {
        let current = self.get(category);
        if floor.min(MAX_SCORE) > current {
            self.set(category, floor);
            Some(current)
        } else {
            None
        }
    }

    /// The highest value in the map.
    pub fn max(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Iterate `(category, value)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, u32)> + '_ {
        RiskCategory::ALL
            .iter()
            .map(move |category| (*category, self.get(*category)))
    }
}

impl fmt::Debug for CategoryScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(category, value)| (category.name(), value)))
            .finish()
    }
}

impl Serialize for CategoryScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(category, value)| (category.name(), value)))
    }
}

/// The stage that produced a category's current value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ScoreSource {
    /// Weighted keyword hits, capped.
    KeywordBaseline {
        /// Raw keyword occurrence count
        hits: usize,
    },
    /// No keyword hits; a random floor value was drawn.
    NoiseFloor,
    /// Raised by a clause the external analysis flagged.
    SemanticOverlay {
        /// Zero-based position of the clause in the analysis
        clause_index: usize,
        /// The clause type as reported upstream
        clause_type: String,
        /// Risk level that triggered the boost
        level: RiskLevel,
    },
    /// Raised to stay consistent with the headline score.
    GlobalSync {
        /// The headline score the radar was synced to
        target: u32,
    },
}

impl ScoreSource {
    /// Short label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreSource::KeywordBaseline { .. } => "keywords",
            ScoreSource::NoiseFloor => "noise floor",
            ScoreSource::SemanticOverlay { .. } => "clause analysis",
            ScoreSource::GlobalSync { .. } => "global sync",
        }
    }
}

/// A final category value together with where it came from.
#[derive(Clone, PartialEq, serde::Serialize)]
pub struct ScoredCategory {
    pub category: RiskCategory,
    pub value: u32,
    pub source: ScoreSource,
}

impl fmt::Debug for ScoredCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact format for snapshot tests: Financial(85, clause analysis)
        write!(
            f,
            "{}({}, {})",
            self.category.name(),
            self.value,
            self.source.label()
        )
    }
}
