use crate::metric::ErrorMetric;

/// Parameters shared by every segment of a chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainConfig {
    /// How a segment's fit error is measured against its chain history.
    pub metric: ErrorMetric,
    /// Largest gap in X between `previous.last` and `first` that is not
    /// reported as a discontinuity.
    pub continuity_tolerance: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            metric: ErrorMetric::MaxSquared,
            continuity_tolerance: 1e-9,
        }
    }
}
