//! Global sync: reconcile the radar with the analysis headline score.
//!
//! When the model says "85/100" but no category got that high, the radar
//! would contradict the headline. The reconciler pins every category tied at
//! the current maximum to the headline and pushes moderately risky
//! categories (above `sync_threshold`) up by the same gap, never past the
//! headline. Low categories are left alone so the radar keeps its shape.

use serde::Serialize;
use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::category::RiskCategory;
use crate::config::ScoringConfig;
use crate::scores::{CategoryScores, MAX_SCORE};

/// What the reconciler did, when it did anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// Headline score the radar was synced to
    pub target: u32,
    /// Maximum category score before syncing
    pub previous_max: u32,
    /// Categories pinned to the target
    pub pinned: Vec<RiskCategory>,
    /// Categories pushed up proportionally
    pub boosted: Vec<RiskCategory>,
}

impl SyncOutcome {
    /// Every category whose score changed.
    pub fn changed(&self) -> impl Iterator<Item = RiskCategory> + '_ {
        self.pinned.iter().chain(self.boosted.iter()).copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GlobalSyncReconciler {
    threshold: u32,
}

impl Default for GlobalSyncReconciler {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl GlobalSyncReconciler {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            threshold: config.sync_threshold,
        }
    }

    /// Sync against the analysis headline. No-op without a headline.
    pub fn reconcile(
        &self,
        scores: CategoryScores,
        analysis: Option<&AnalysisResult>,
    ) -> CategoryScores {
        self.reconcile_with_trace(scores, analysis).0
    }

    /// Like [`GlobalSyncReconciler::reconcile`], also reporting which
    /// categories moved.
    pub fn reconcile_with_trace(
        &self,
        scores: CategoryScores,
        analysis: Option<&AnalysisResult>,
    ) -> (CategoryScores, Option<SyncOutcome>) {
        match analysis.and_then(|a| a.risk_score) {
            Some(target) => self.sync_to(scores, target),
            None => (scores, None),
        }
    }

    /// Sync `scores` to an explicit headline `target`.
    pub fn sync_to(
        &self,
        mut scores: CategoryScores,
        target: u32,
    ) -> (CategoryScores, Option<SyncOutcome>) {
        let target = target.min(MAX_SCORE);
        let current_max = scores.max();

        if target <= current_max {
            debug!(target, current_max, "radar already covers headline");
            return (scores, None);
        }

        let diff = target - current_max;
        let mut outcome = SyncOutcome {
            target,
            previous_max: current_max,
            pinned: Vec::new(),
            boosted: Vec::new(),
        };

        for category in RiskCategory::ALL {
            let value = scores.get(category);
            if value == current_max {
                scores.set(category, target);
                outcome.pinned.push(category);
            } else if value > self.threshold {
                scores.set(category, (value + diff).min(target));
                outcome.boosted.push(category);
            }
        }

        debug!(
            target,
            current_max,
            pinned = outcome.pinned.len(),
            boosted = outcome.boosted.len(),
            "synced radar to headline"
        );
        (scores, Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::RiskCategory::*;

    fn headline(score: u32) -> AnalysisResult {
        AnalysisResult {
            risk_score: Some(score),
            ..AnalysisResult::default()
        }
    }

    #[test]
    fn test_noop_when_target_not_above_max() {
        let sync = GlobalSyncReconciler::default();
        let scores = CategoryScores::new([85, 40, 10, 10, 10]);
        let (after, outcome) = sync.reconcile_with_trace(scores, Some(&headline(60)));
        assert_eq!(after, scores);
        assert!(outcome.is_none());

        let (after, _) = sync.reconcile_with_trace(scores, Some(&headline(85)));
        assert_eq!(after, scores);
    }

    #[test]
    fn test_ties_at_max_are_all_pinned() {
        let sync = GlobalSyncReconciler::default();
        let scores = CategoryScores::new([50, 50, 10, 10, 10]);

        let (after, outcome) = sync.reconcile_with_trace(scores, Some(&headline(90)));

        assert_eq!(after, CategoryScores::new([90, 90, 10, 10, 10]));
        let outcome = outcome.unwrap();
        assert_eq!(outcome.pinned, vec![Financial, Legal]);
        assert!(outcome.boosted.is_empty());
    }

    #[test]
    fn test_moderate_categories_pushed_proportionally() {
        let sync = GlobalSyncReconciler::default();
        let scores = CategoryScores::new([60, 40, 10, 10, 10]);

        let after = sync.reconcile(scores, Some(&headline(100)));

        assert_eq!(after.get(Financial), 100);
        assert_eq!(after.get(Legal), 80);
        assert_eq!(after.get(Operational), 10);
    }

    #[test]
    fn test_push_keeps_relative_shape() {
        let sync = GlobalSyncReconciler::default();
        // diff = 90 - 50 = 40: 45 -> 85, 31 -> 71, 30 and 5 untouched
        let scores = CategoryScores::new([50, 45, 31, 30, 5]);

        let after = sync.reconcile(scores, Some(&headline(90)));

        assert_eq!(after, CategoryScores::new([90, 85, 71, 30, 5]));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let sync = GlobalSyncReconciler::default();
        let scores = CategoryScores::new([40, 30, 31, 10, 10]);
        let after = sync.reconcile(scores, Some(&headline(70)));
        assert_eq!(after.get(Legal), 30);
        assert_eq!(after.get(Operational), 61);
    }

    #[test]
    fn test_missing_headline_is_noop() {
        let sync = GlobalSyncReconciler::default();
        let scores = CategoryScores::new([10, 20, 30, 40, 50]);
        assert_eq!(sync.reconcile(scores, None), scores);
        assert_eq!(
            sync.reconcile(scores, Some(&AnalysisResult::default())),
            scores
        );
    }

    #[test]
    fn test_target_above_axis_is_clamped() {
        let sync = GlobalSyncReconciler::default();
        let scores = CategoryScores::new([50, 45, 10, 10, 10]);
        let (after, outcome) = sync.sync_to(scores, 250);
        assert_eq!(after.get(Financial), 100);
        assert_eq!(after.get(Legal), 95);
        assert_eq!(outcome.unwrap().target, 100);
    }
}
