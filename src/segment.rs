//! One cubic polynomial piece of a fitted chain.
//!
//! The polynomial is stored in local coordinates: `u = x - first.x`, so
//! `f(u) = a·u³ + b·u² + c·u + d` and the absolute curve is
//! `y(x) = f(x - first.x) + first.y`.

use kurbo::Point;
use once_cell::sync::OnceCell;

use crate::error::ChainError;

/// Upper bound on the number of points a single `sample` call produces.
pub const MAX_SAMPLES: usize = 1 << 24;

/// A cubic polynomial fitted over `[first.x, last.x]`.
///
/// Immutable after construction, apart from the fit error which is
/// computed once by the owning [`Chain`](crate::Chain) and cached here.
#[derive(Debug)]
pub struct CubicSegment {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    index: usize,
    first: Point,
    last: Point,
    previous: Option<usize>,
    pub(crate) error: OnceCell<f64>,
}

/// A clone starts with an empty error cache: the error depends on the
/// chain the segment ends up in, not only on the segment.
impl Clone for CubicSegment {
    fn clone(&self) -> Self {
        Self {
            error: OnceCell::new(),
            ..*self
        }
    }
}

impl CubicSegment {
    /// Build a segment from coefficients `[a, b, c, d]` and its endpoints.
    ///
    /// `previous` is the chain position of the segment this one continues.
    /// Fails when the segment has no positive width or carries NaN/Inf.
    pub fn new(
        index: usize,
        coefficients: [f64; 4],
        first: Point,
        last: Point,
        previous: Option<usize>,
    ) -> Result<Self, ChainError> {
        let [a, b, c, d] = coefficients;
        let finite = coefficients.iter().all(|v| v.is_finite())
            && first.is_finite()
            && last.is_finite();
        if !finite {
            return Err(ChainError::NonFinite { index });
        }
        let width = last.x - first.x;
        if width <= 0.0 {
            return Err(ChainError::NonPositiveWidth { index, width });
        }
        Ok(Self {
            a,
            b,
            c,
            d,
            index,
            first,
            last,
            previous,
            error: OnceCell::new(),
        })
    }

    /// Coefficients `[a, b, c, d]`, highest degree first.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Ordinal position reported by the fitting process.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn first(&self) -> Point {
        self.first
    }

    pub fn last(&self) -> Point {
        self.last
    }

    /// Chain position of the preceding segment, `None` for a chain head.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn width(&self) -> f64 {
        self.last.x - self.first.x
    }

    /// Evaluate the polynomial at local coordinate `u` (Horner).
    pub fn rel_evaluate(&self, u: f64) -> f64 {
        ((self.a * u + self.b) * u + self.c) * u + self.d
    }

    /// First derivative at local coordinate `u`.
    pub fn rel_derivative(&self, u: f64) -> f64 {
        (3.0 * self.a * u + 2.0 * self.b) * u + self.c
    }

    /// Evaluate the curve at absolute `x`.
    pub fn abs_evaluate(&self, x: f64) -> f64 {
        self.rel_evaluate(x - self.first.x) + self.first.y
    }

    /// Slope of the curve at absolute `x`.
    pub fn abs_derivative(&self, x: f64) -> f64 {
        self.rel_derivative(x - self.first.x)
    }

    /// Sample the curve at `ceil(width / dist) + 1` evenly spaced x values.
    ///
    /// The first and last samples sit exactly on `first.x` and `last.x`.
    pub fn sample(&self, dist: f64) -> Result<Vec<Point>, ChainError> {
        if !(dist > 0.0 && dist.is_finite()) {
            return Err(ChainError::InvalidSampleDistance(dist));
        }
        let x1 = self.first.x;
        let x2 = self.last.x;
        let count = ((x2 - x1) / dist).ceil().max(1.0);
        if !count.is_finite() || count >= MAX_SAMPLES as f64 {
            return Err(ChainError::TooManySamples { dist, count });
        }
        let steps = count as usize;
        let points = (0..=steps)
            .map(|i| {
                let x = if i == steps {
                    x2
                } else {
                    x1 + i as f64 * (x2 - x1) / steps as f64
                };
                Point::new(x, self.abs_evaluate(x))
            })
            .collect();
        Ok(points)
    }
}
