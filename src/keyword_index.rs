//! Trigger terms per risk category.
//!
//! The standard index mixes English contract vocabulary with transliterated
//! Hindi synonyms (`jurmana` for penalty, `vivad` for dispute, ...) so that
//! contracts written in either language register on the baseline.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::category::RiskCategory;

static STANDARD_INDEX: Lazy<KeywordRiskIndex> = Lazy::new(KeywordRiskIndex::build_standard);

/// Mapping from each [`RiskCategory`] to the lowercase terms whose
/// occurrences feed its baseline score.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRiskIndex {
    sets: [Vec<String>; RiskCategory::COUNT],
}

impl KeywordRiskIndex {
    /// The shared read-only standard index.
    pub fn standard() -> &'static KeywordRiskIndex {
        &STANDARD_INDEX
    }

    fn build_standard() -> Self {
        // Format: (category, [terms...])
        let table = [
            (
                RiskCategory::Financial,
                &[
                    "penalty", "indemnify", "liquidated damages", "reimburse", "fine", "cost",
                    "jurmana", "harjana", "shulk", "vool",
                ][..],
            ),
            (
                RiskCategory::Legal,
                &[
                    "jurisdiction", "arbitration", "litigation", "court", "lawsuit", "dispute",
                    "nyayalaya", "vivad", "madhyasthata", "kanooni",
                ],
            ),
            (
                RiskCategory::Operational,
                &[
                    "exclusive", "non-compete", "restrict", "prohibit", "consent required",
                    "pratibandh", "anumati", "rok",
                ],
            ),
            (
                RiskCategory::Compliance,
                &[
                    "audit", "regulation", "gdpr", "statutory", "license", "niyam", "vidhan",
                    "anupalan",
                ],
            ),
            (
                RiskCategory::Termination,
                &[
                    "terminate", "cause", "notice period", "immediate effect", "samapt", "notis",
                ],
            ),
        ];

        let mut index = Self {
            sets: Default::default(),
        };
        for (category, terms) in table {
            for term in terms {
                index.insert(category, term);
            }
        }
        index
    }

    /// Returns a copy of this index with additional terms appended.
    ///
    /// Terms are lowercased and trimmed; blanks and duplicates are dropped.
    pub fn with_extra_keywords(&self, extra: &BTreeMap<RiskCategory, Vec<String>>) -> Self {
        let mut index = self.clone();
        for (category, terms) in extra {
            for term in terms {
                index.insert(*category, term);
            }
        }
        index
    }

    fn insert(&mut self, category: RiskCategory, term: &str) {
        let term = term.trim().to_lowercase();
        // An empty needle would match between every character.
        if term.is_empty() {
            return;
        }
        let set = &mut self.sets[category.index()];
        if !set.contains(&term) {
            set.push(term);
        }
    }

    /// Terms registered for `category`.
    pub fn keywords(&self, category: RiskCategory) -> &[String] {
        &self.sets[category.index()]
    }

    /// Iterate `(category, terms)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, &[String])> + '_ {
        RiskCategory::ALL
            .iter()
            .map(move |category| (*category, self.keywords(*category)))
    }

    /// Total keyword hits for `category` in already-lowercased text.
    ///
    /// Plain substring counting: no word boundaries, so "cost" also fires
    /// inside "costly". Each term counts non-overlapping occurrences.
    pub fn count_hits(&self, category: RiskCategory, text_lower: &str) -> usize {
        self.keywords(category)
            .iter()
            .map(|term| text_lower.matches(term.as_str()).count())
            .sum()
    }
}
