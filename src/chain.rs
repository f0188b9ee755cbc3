//! Backward-linked chains of cubic segments.
//!
//! The fitting process produces segments bottom-up, each naming the one
//! it continues. All segments live in one `Vec`; `previous` is a position
//! in that `Vec`, always smaller than the segment's own position, so the
//! links can never form a cycle.

use kurbo::Point;
use log::{debug, trace, warn};

use crate::bezier::{assemble_path, collect_endpoints, ChainPath};
use crate::config::ChainConfig;
use crate::error::ChainError;
use crate::report::{ChainSummary, SegmentReport};
use crate::segment::CubicSegment;

/// An owned, validated set of segments linked through `previous`.
#[derive(Debug, Clone)]
pub struct Chain {
    segments: Vec<CubicSegment>,
    config: ChainConfig,
}

impl Chain {
    /// Take ownership of `segments` after checking every link.
    ///
    /// A link must point to an earlier position. Gaps in X between a
    /// segment and its predecessor are logged, not rejected.
    pub fn new(segments: Vec<CubicSegment>, config: ChainConfig) -> Result<Self, ChainError> {
        if segments.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        for (position, segment) in segments.iter().enumerate() {
            let Some(previous) = segment.previous() else {
                continue;
            };
            if previous >= position {
                return Err(ChainError::BrokenLink {
                    index: position,
                    previous,
                });
            }
            let gap = segment.first().x - segments[previous].last().x;
            if gap.abs() > config.continuity_tolerance {
                warn!(
                    "segment {} starts at x={} but segment {} ends at x={}",
                    position,
                    segment.first().x,
                    previous,
                    segments[previous].last().x
                );
            }
        }
        debug!("chain of {} segments", segments.len());
        Ok(Self { segments, config })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed chain.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CubicSegment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    /// Position of the last segment, where the longest lineage usually ends.
    pub fn terminal(&self) -> usize {
        self.segments.len() - 1
    }

    fn segment(&self, index: usize) -> Result<&CubicSegment, ChainError> {
        self.segments.get(index).ok_or(ChainError::OutOfRange {
            index,
            len: self.segments.len(),
        })
    }

    /// Every original point visible from `index`, newest first.
    ///
    /// Yields each segment's `last` walking backwards through the links,
    /// then the `first` of the earliest segment. This covers the whole
    /// chain prefix ending at `index`, not just the segment's endpoints.
    pub fn points(&self, index: usize) -> Result<Points<'_>, ChainError> {
        self.segment(index)?;
        Ok(Points {
            chain: self,
            link: Some(index),
            head: None,
        })
    }

    /// Fit error of the segment at `index`, computed on first use.
    ///
    /// A segment with no predecessor has nothing to be checked against
    /// and reports 0.
    pub fn error(&self, index: usize) -> Result<f64, ChainError> {
        let segment = self.segment(index)?;
        let error = *segment.error.get_or_init(|| {
            if segment.previous().is_none() {
                return 0.0;
            }
            let points = Points {
                chain: self,
                link: Some(index),
                head: None,
            };
            let error = self.config.metric.measure(segment, points);
            trace!("segment {} error {:?} = {}", index, self.config.metric, error);
            error
        });
        Ok(error)
    }

    /// Chain positions from the head of the chain up to and including `index`.
    pub fn ancestry(&self, index: usize) -> Result<Vec<usize>, ChainError> {
        let mut positions = Vec::new();
        let mut link = Some(index);
        while let Some(i) = link {
            positions.push(i);
            link = self.segment(i)?.previous();
        }
        positions.reverse();
        Ok(positions)
    }

    /// Segments from the head of the chain up to and including `index`.
    pub fn lineage(&self, index: usize) -> Result<Vec<&CubicSegment>, ChainError> {
        let positions = self.ancestry(index)?;
        Ok(positions.into_iter().map(|i| &self.segments[i]).collect())
    }

    /// Bezier path covering the lineage ending at `index`.
    pub fn path_to(&self, index: usize) -> Result<ChainPath, ChainError> {
        assemble_path(self.lineage(index)?)
    }

    /// Polyline of segment endpoints for the lineage ending at `index`.
    pub fn endpoints_to(&self, index: usize) -> Result<Vec<Point>, ChainError> {
        Ok(collect_endpoints(self.lineage(index)?))
    }

    /// Diagnostic line for one segment.
    pub fn report(&self, index: usize) -> Result<SegmentReport, ChainError> {
        let segment = self.segment(index)?;
        Ok(SegmentReport {
            position: index,
            index: segment.index(),
            coefficients: segment.coefficients(),
            first: segment.first(),
            last: segment.last(),
            width: segment.width(),
            error: self.error(index)?,
        })
    }

    /// Aggregate figures for the lineage ending at `index`.
    pub fn summary(&self, index: usize) -> Result<ChainSummary, ChainError> {
        let mut summary = ChainSummary::default();
        let mut link = Some(index);
        while let Some(i) = link {
            let segment = self.segment(i)?;
            let error = self.error(i)?;
            summary.segments += 1;
            summary.total_width += segment.width();
            if summary.worst.map_or(true, |(_, worst)| error > worst) {
                summary.worst = Some((i, error));
            }
            link = segment.previous();
        }
        summary.metric = self.config.metric;
        Ok(summary)
    }
}

/// Iterator returned by [`Chain::points`].
#[derive(Debug, Clone)]
pub struct Points<'a> {
    chain: &'a Chain,
    link: Option<usize>,
    head: Option<Point>,
}

impl Iterator for Points<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if let Some(i) = self.link {
            let segment = &self.chain.segments[i];
            self.link = segment.previous();
            self.head = Some(segment.first());
            return Some(segment.last());
        }
        self.head.take()
    }
}
