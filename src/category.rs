//! The five fixed risk dimensions plotted on the radar.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One axis of the risk radar.
///
/// Declaration order is the iteration order used by every score map and by
/// the radar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Penalties, indemnities, reimbursements and other money exposure.
    Financial,
    /// Jurisdiction, arbitration and dispute handling.
    Legal,
    /// Exclusivity, non-compete and consent restrictions.
    Operational,
    /// Audits, regulation and licensing duties.
    Compliance,
    /// How and when the contract can be ended.
    Termination,
}

impl RiskCategory {
    /// All categories in declaration order.
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Financial,
        RiskCategory::Legal,
        RiskCategory::Operational,
        RiskCategory::Compliance,
        RiskCategory::Termination,
    ];

    /// Number of categories.
    pub const COUNT: usize = Self::ALL.len();

    /// Display label used on the radar axis.
    pub fn name(&self) -> &'static str {
        match self {
            RiskCategory::Financial => "Financial",
            RiskCategory::Legal => "Legal",
            RiskCategory::Operational => "Operational",
            RiskCategory::Compliance => "Compliance",
            RiskCategory::Termination => "Termination",
        }
    }

    /// Position of this category in [`RiskCategory::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Case-insensitive lookup by label.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_declaration_order() {
        for (position, category) in RiskCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(RiskCategory::from_name("legal"), Some(RiskCategory::Legal));
        assert_eq!(
            RiskCategory::from_name(" TERMINATION "),
            Some(RiskCategory::Termination)
        );
        assert_eq!(RiskCategory::from_name("Privacy"), None);
    }
}
