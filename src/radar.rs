//! Projection of final scores onto a polar chart series.

use serde::Serialize;

use crate::scores::{CategoryScores, MAX_SCORE};

/// Ordered `(category, value)` points for a radar chart whose radial axis
/// is fixed to `0..=100`.
///
/// Serializes as parallel `theta` (labels) and `r` (values) arrays, the
/// shape polar plotting libraries expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarSeries {
    theta: Vec<&'static str>,
    r: Vec<u32>,
    range: [u32; 2],
}

impl RadarSeries {
    /// Category labels in declaration order.
    pub fn labels(&self) -> &[&'static str] {
        &self.theta
    }

    /// Values aligned with [`RadarSeries::labels`].
    pub fn values(&self) -> &[u32] {
        &self.r
    }

    /// Fixed radial axis range.
    pub fn range(&self) -> (u32, u32) {
        (self.range[0], self.range[1])
    }

    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    /// Iterate `(label, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.theta.iter().copied().zip(self.r.iter().copied())
    }
}

/// Turns a score map into a [`RadarSeries`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RadarProjector;

impl RadarProjector {
    pub fn project(&self, scores: &CategoryScores) -> RadarSeries {
        let (theta, r) = scores
            .iter()
            .map(|(category, value)| (category.name(), value))
            .unzip();
        RadarSeries {
            theta,
            r,
            range: [0, MAX_SCORE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_preserves_order() {
        let scores = CategoryScores::new([85, 10, 60, 12, 90]);
        let series = RadarProjector.project(&scores);

        insta::assert_debug_snapshot!(series.points().collect::<Vec<_>>(), @r###"
        [
            (
                "Financial",
                85,
            ),
            (
                "Legal",
                10,
            ),
            (
                "Operational",
                60,
            ),
            (
                "Compliance",
                12,
            ),
            (
                "Termination",
                90,
            ),
        ]
        "###);
        assert_eq!(series.range(), (0, 100));
    }

    #[test]
    fn test_serialized_shape() {
        let series = RadarProjector.project(&CategoryScores::new([1, 2, 3, 4, 5]));
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "theta": ["Financial", "Legal", "Operational", "Compliance", "Termination"],
                "r": [1, 2, 3, 4, 5],
                "range": [0, 100]
            })
        );
    }
}
