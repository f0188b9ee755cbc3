//! Human-readable diagnostics for segments and chains.

use std::fmt;

use kurbo::Point;

use crate::metric::ErrorMetric;

/// Snapshot of one segment for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentReport {
    /// Position in the owning chain.
    pub position: usize,
    /// Index assigned by the fitting process.
    pub index: usize,
    pub coefficients: [f64; 4],
    pub first: Point,
    pub last: Point,
    pub width: f64,
    pub error: f64,
}

impl fmt::Display for SegmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.coefficients;
        write!(
            f,
            "{:.2}x^3 + {:.2}x^2 + {:.2}x + {:.2}, first:({:.2}, {:.2}), last:({:.2}, {:.2}), error:{:.3}",
            a, b, c, d, self.first.x, self.first.y, self.last.x, self.last.y, self.error,
        )
    }
}

/// Aggregate figures over a lineage of segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainSummary {
    pub segments: usize,
    pub total_width: f64,
    /// Chain position and error of the worst-fitting segment.
    pub worst: Option<(usize, f64)>,
    pub metric: ErrorMetric,
}

impl fmt::Display for ChainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metric = match self.metric {
            ErrorMetric::MaxSquared => "max squared",
            ErrorMetric::MeanSquared => "mean squared",
        };
        writeln!(f, "  Segments    {}", self.segments)?;
        writeln!(f, "  Width       {:.2}", self.total_width)?;
        match self.worst {
            Some((position, error)) => write!(
                f,
                "  Worst       segment {} \u{00b7} error {:.3} ({})",
                position, error, metric
            ),
            None => write!(f, "  Worst       none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::tests::parabola_chain;
    use crate::config::ChainConfig;

    #[test]
    fn segment_line_format() {
        let report = SegmentReport {
            position: 0,
            index: 0,
            coefficients: [1.0, -0.5, 2.25, 0.0],
            first: Point::new(0.0, 1.0),
            last: Point::new(2.5, 3.126),
            width: 2.5,
            error: 0.12345,
        };
        assert_eq!(
            report.to_string(),
            "1.00x^3 + -0.50x^2 + 2.25x + 0.00, first:(0.00, 1.00), last:(2.50, 3.13), error:0.123"
        );
    }

    #[test]
    fn chain_reports() {
        let chain = parabola_chain(ChainConfig::default());
        let report = chain.report(1).unwrap();
        assert_eq!(report.coefficients, [0.0, 1.0, 2.0, 0.0]);
        assert_eq!(report.first, Point::new(1.0, 1.0));
        assert_eq!(report.width, 1.0);
        assert_eq!(report.error, 0.0);

        let summary = chain.summary(2).unwrap();
        assert_eq!(summary.segments, 3);
        let text = summary.to_string();
        assert!(text.contains("Segments    3"), "{text}");
        assert!(text.contains("max squared"), "{text}");
    }
}
