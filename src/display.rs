//! Plain-text rendering of an assessment.
//!
//! Used by the CLI's text output and by snapshot tests. Each category gets a
//! fixed-width bar on the `0..=100` axis followed by its value and the stage
//! that produced it:
//!
//! ```text
//! Financial    #################...   85  clause analysis
//! Legal        ##..................   10  noise floor
//! ```

use std::fmt::{self, Write};

use crate::dashboard::DashboardSummary;
use crate::pipeline::RiskAssessment;
use crate::scores::MAX_SCORE;

const BAR_WIDTH: u32 = 20;

/// Renders a [`RiskAssessment`], optionally with its trace and dashboard.
pub struct AssessmentDisplay<'a> {
    assessment: &'a RiskAssessment,
    dashboard: Option<&'a DashboardSummary>,
    show_trace: bool,
}

impl<'a> AssessmentDisplay<'a> {
    pub fn new(assessment: &'a RiskAssessment) -> Self {
        Self {
            assessment,
            dashboard: None,
            show_trace: false,
        }
    }

    /// Prefix the radar with the dashboard headline.
    pub fn with_dashboard(mut self, dashboard: &'a DashboardSummary) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    /// Append the clause boosts and sync outcome.
    pub fn with_trace(mut self) -> Self {
        self.show_trace = true;
        self
    }

    fn write_headline(
        &self,
        f: &mut fmt::Formatter<'_>,
        dashboard: &DashboardSummary,
    ) -> fmt::Result {
        writeln!(
            f,
            "overall: {}/{} {}",
            dashboard.headline_score,
            MAX_SCORE,
            dashboard.verdict.label()
        )?;
        writeln!(f, "clauses (approx): {}", dashboard.approx_clause_count)?;
        if let Some(summary) = &dashboard.executive_summary {
            writeln!(f, "summary: {}", summary)?;
        }
        if !dashboard.missing_clauses.is_empty() {
            writeln!(f, "missing: {}", dashboard.missing_clauses.join(", "))?;
        }
        Ok(())
    }

    fn write_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for boost in &self.assessment.boosts {
            writeln!(
                f,
                "boost: clause {} {:?} ({}) {} {} -> {}",
                boost.clause_index + 1,
                boost.clause_type,
                boost.level,
                boost.category,
                boost.from,
                boost.to
            )?;
        }
        if let Some(sync) = &self.assessment.sync {
            let names = |categories: &[crate::category::RiskCategory]| {
                if categories.is_empty() {
                    "-".to_string()
                } else {
                    categories
                        .iter()
                        .map(|c| c.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            };
            writeln!(
                f,
                "sync: {} -> {} (pinned: {}; boosted: {})",
                sync.previous_max,
                sync.target,
                names(&sync.pinned),
                names(&sync.boosted)
            )?;
        }
        Ok(())
    }
}

fn bar(value: u32) -> String {
    let filled = (value.min(MAX_SCORE) * BAR_WIDTH / MAX_SCORE) as usize;
    let mut out = String::with_capacity(BAR_WIDTH as usize);
    out.extend(std::iter::repeat('#').take(filled));
    out.extend(std::iter::repeat('.').take(BAR_WIDTH as usize - filled));
    out
}

impl<'a> fmt::Display for AssessmentDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dashboard) = self.dashboard {
            self.write_headline(f, dashboard)?;
        }

        let mut rows = String::new();
        for scored in &self.assessment.categories {
            writeln!(
                rows,
                "{:<12} {} {:>4}  {}",
                scored.category.name(),
                bar(scored.value),
                scored.value,
                scored.source.label()
            )?;
        }
        f.write_str(&rows)?;

        if self.show_trace {
            self.write_trace(f)?;
        }
        Ok(())
    }
}
