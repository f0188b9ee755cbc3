//! Exact cubic bezier form of polynomial segments, and path assembly.
//!
//! A cubic in X, reparameterized uniformly in t over the segment's
//! interval, is itself a cubic in t. Matching the polynomial at t = 0,
//! 1/3, 2/3 and 1 therefore pins down the bezier control points exactly.

use std::sync::Arc;

use kurbo::{BezPath, CubicBez, PathEl, Point};
use log::{debug, warn};

use crate::error::ChainError;
use crate::segment::CubicSegment;

/// Bernstein weights of the two outer control points at t = 1/3:
/// (2/3)³ and (1/3)³. At t = 2/3 they swap.
const OUTER_NEAR: f64 = 8.0 / 27.0;
const OUTER_FAR: f64 = 1.0 / 27.0;

/// Control points `[p1, c1, c2, p4]` of the bezier equal to `segment`.
pub fn control_points(segment: &CubicSegment) -> [Point; 4] {
    let p1 = segment.first();
    let p4 = segment.last();

    let x_diff = p4.x - p1.x;
    let x1 = p1.x + x_diff / 3.0;
    let x2 = p1.x + 2.0 * x_diff / 3.0;
    let y1 = segment.abs_evaluate(x1);
    let y2 = segment.abs_evaluate(x2);

    // Remaining unknowns satisfy
    //   4/9·c1 + 2/9·c2 = b1
    //   2/9·c1 + 4/9·c2 = b2
    let b1 = y1 - OUTER_NEAR * p1.y - OUTER_FAR * p4.y;
    let b2 = y2 - OUTER_FAR * p1.y - OUTER_NEAR * p4.y;
    let c1 = 3.0 * b1 - 1.5 * b2;
    let c2 = 3.0 * b2 - 1.5 * b1;

    [p1, Point::new(x1, c1), Point::new(x2, c2), p4]
}

/// The segment as a kurbo cubic.
pub fn to_cubic(segment: &CubicSegment) -> CubicBez {
    let [p0, p1, p2, p3] = control_points(segment);
    CubicBez::new(p0, p1, p2, p3)
}

/// One `curve_to` of an assembled path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveCommand {
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

/// Accumulates segments into a single open bezier path.
#[derive(Debug, Default)]
pub struct PathAssembler {
    path: BezPath,
    start: Option<Point>,
    current: Option<Point>,
    count: usize,
}

impl PathAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `segment` as a curve starting where the path currently ends.
    ///
    /// The first segment opens the path at its `first` point. Later
    /// segments are expected to start at the previous end point; a gap is
    /// logged and the curve is drawn from the previous end regardless.
    pub fn push_segment(&mut self, segment: &CubicSegment) {
        let [p1, c1, c2, p4] = control_points(segment);
        match self.current {
            None => {
                self.path.move_to(p1);
                self.start = Some(p1);
            }
            Some(end) if end != p1 => {
                warn!(
                    "segment {} starts at ({}, {}), path ends at ({}, {})",
                    segment.index(),
                    p1.x,
                    p1.y,
                    end.x,
                    end.y
                );
            }
            Some(_) => {}
        }
        self.path.curve_to(c1, c2, p4);
        self.current = Some(p4);
        self.count += 1;
    }

    /// Freeze the accumulated commands.
    pub fn finish(self) -> Result<ChainPath, ChainError> {
        let Some(start) = self.start else {
            return Err(ChainError::EmptyChain);
        };
        debug!("assembled path from {} segments", self.count);
        Ok(ChainPath {
            start,
            path: Arc::new(self.path),
        })
    }
}

/// An immutable, shareable bezier path covering a run of segments.
///
/// Cloning shares the underlying path.
#[derive(Debug, Clone)]
pub struct ChainPath {
    start: Point,
    path: Arc<BezPath>,
}

impl ChainPath {
    pub fn start(&self) -> Point {
        self.start
    }

    /// The `curve_to` commands in order.
    pub fn commands(&self) -> impl Iterator<Item = CurveCommand> + '_ {
        self.path.elements().iter().filter_map(|el| match *el {
            PathEl::CurveTo(c1, c2, end) => Some(CurveCommand { c1, c2, end }),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands().count()
    }

    /// Always false: an empty assembler cannot be finished.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bez_path(&self) -> &BezPath {
        &self.path
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }
}

/// Stitch `segments`, in order, into one path.
pub fn assemble_path<'a, I>(segments: I) -> Result<ChainPath, ChainError>
where
    I: IntoIterator<Item = &'a CubicSegment>,
{
    let mut assembler = PathAssembler::new();
    for segment in segments {
        assembler.push_segment(segment);
    }
    assembler.finish()
}

/// Each segment's `first` point followed by the last segment's `last`:
/// the polyline the bezier path approximates.
pub fn collect_endpoints<'a, I>(segments: I) -> Vec<Point>
where
    I: IntoIterator<Item = &'a CubicSegment>,
{
    let mut points = Vec::new();
    let mut tail = None;
    for segment in segments {
        points.push(segment.first());
        tail = Some(segment.last());
    }
    points.extend(tail);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::tests::parabola_chain;
    use crate::config::ChainConfig;
    use crate::segment::tests::assert_close;
    use kurbo::ParamCurve;

    fn line() -> CubicSegment {
        CubicSegment::new(
            0,
            [0.0, 0.0, 1.0, 0.0],
            Point::new(0.0, 0.0),
            Point::new(3.0, 3.0),
            None,
        )
        .unwrap()
    }

    fn wiggle() -> CubicSegment {
        CubicSegment::new(
            3,
            [0.8, -2.1, 0.4, 0.0],
            Point::new(1.5, -2.0),
            Point::new(4.0, -1.625),
            None,
        )
        .unwrap()
    }

    #[test]
    fn line_has_collinear_controls() {
        let [p1, c1, c2, p4] = control_points(&line());
        assert_eq!(p1, Point::new(0.0, 0.0));
        assert_eq!(p4, Point::new(3.0, 3.0));
        assert_close(c1.x, 1.0, 1e-12);
        assert_close(c1.y, 1.0, 1e-12);
        assert_close(c2.x, 2.0, 1e-12);
        assert_close(c2.y, 2.0, 1e-12);
    }

    #[test]
    fn bezier_matches_polynomial_at_thirds_and_ends() {
        let seg = wiggle();
        let cubic = to_cubic(&seg);
        assert_eq!(cubic.eval(0.0), seg.first());
        assert_eq!(cubic.eval(1.0), seg.last());
        for t in [1.0 / 3.0, 2.0 / 3.0] {
            let p = cubic.eval(t);
            assert_close(p.x, seg.first().x + t * seg.width(), 1e-12);
            assert_close(p.y, seg.abs_evaluate(p.x), 1e-9);
        }
    }

    #[test]
    fn bezier_reproduces_cubic_everywhere() {
        let seg = wiggle();
        let cubic = to_cubic(&seg);
        for i in 0..=50 {
            let t = i as f64 / 50.0;
            let p = cubic.eval(t);
            assert_close(p.y, seg.abs_evaluate(p.x), 1e-9);
        }
    }

    #[test]
    fn assembled_path_follows_segments() {
        let chain = parabola_chain(ChainConfig::default());
        let path = assemble_path(chain.segments()).unwrap();
        assert_eq!(path.start(), Point::new(0.0, 0.0));
        let commands: Vec<CurveCommand> = path.commands().collect();
        assert_eq!(commands.len(), 3);
        for (command, segment) in commands.iter().zip(chain.segments()) {
            let [_, c1, c2, p4] = control_points(segment);
            assert_eq!(*command, CurveCommand { c1, c2, end: p4 });
        }
        assert_eq!(commands[2].end, Point::new(3.0, 9.0));
        assert_eq!(path.len(), 3);
        assert!(path.to_svg().starts_with('M'));
    }

    #[test_log::test]
    fn gap_between_segments_draws_from_previous_end() {
        let left = CubicSegment::new(
            0,
            [0.0, 0.0, 1.0, 0.0],
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            None,
        )
        .unwrap();
        let right = CubicSegment::new(
            1,
            [0.0, 0.0, -1.0, 0.0],
            Point::new(2.0, 5.0),
            Point::new(5.0, 2.0),
            Some(0),
        )
        .unwrap();
        let mut assembler = PathAssembler::new();
        assembler.push_segment(&left);
        assembler.push_segment(&right);
        let path = assembler.finish().unwrap();

        assert_eq!(path.start(), Point::new(0.0, 0.0));
        let commands: Vec<CurveCommand> = path.commands().collect();
        assert_eq!(commands.len(), 2);
        let [_, c1, c2, p4] = control_points(&right);
        assert_eq!(commands[1], CurveCommand { c1, c2, end: p4 });
        assert_eq!(commands[1].end, Point::new(5.0, 2.0));
        // No move_to for the second segment: the path stays one figure.
        let moves = path
            .bez_path()
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn assembled_path_is_shared_on_clone() {
        let chain = parabola_chain(ChainConfig::default());
        let path = chain.path_to(chain.terminal()).unwrap();
        let copy = path.clone();
        assert!(std::ptr::eq(path.bez_path(), copy.bez_path()));
    }

    #[test]
    fn empty_assembly_is_an_error() {
        assert!(matches!(
            assemble_path(std::iter::empty::<&CubicSegment>()),
            Err(ChainError::EmptyChain)
        ));
    }

    #[test]
    fn endpoints_of_chain() {
        let chain = parabola_chain(ChainConfig::default());
        let points = collect_endpoints(chain.segments());
        assert_eq!(points.len(), chain.len() + 1);
        assert_eq!(
            points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 4.0),
                Point::new(3.0, 9.0),
            ]
        );
        assert!(collect_endpoints(std::iter::empty::<&CubicSegment>()).is_empty());
    }
}
