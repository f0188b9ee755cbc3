//! Fit quality of a segment against every point visible from it.

use kurbo::Point;

use crate::segment::CubicSegment;

/// How deviations between a segment's curve and its chain history are
/// folded into one number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMetric {
    /// Largest squared Y deviation over all visible points.
    #[default]
    MaxSquared,
    /// Sum of squared Y deviations divided by the segment width.
    MeanSquared,
}

impl ErrorMetric {
    /// Measure `segment` against `points`.
    ///
    /// Points outside the segment's own interval are evaluated by
    /// extrapolating its cubic, so a curve that swings away from the
    /// earlier history is penalized.
    pub fn measure<I>(self, segment: &CubicSegment, points: I) -> f64
    where
        I: IntoIterator<Item = Point>,
    {
        let deviations = points.into_iter().map(|p| {
            let dy = p.y - segment.abs_evaluate(p.x);
            dy * dy
        });
        match self {
            ErrorMetric::MaxSquared => deviations.fold(0.0, f64::max),
            ErrorMetric::MeanSquared => deviations.sum::<f64>() / segment.width(),
        }
    }
}
