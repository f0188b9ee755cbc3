//! JSON description of a fitted chain.
//!
//! ```json
//! { "segments": [
//!     { "coefficients": [0, 0, 1, 0], "first": [0, 0], "last": [1, 1] },
//!     { "coefficients": [0, 1, 1, 0], "first": [1, 1], "last": [2, 3], "previous": 0 }
//! ] }
//! ```
//!
//! `index` defaults to the segment's position in the list.

use std::path::Path;

use kurbo::Point;
use serde::Deserialize;

use crate::chain::Chain;
use crate::config::ChainConfig;
use crate::error::ChainError;
use crate::segment::CubicSegment;

#[derive(Debug, Deserialize)]
struct ChainFile {
    segments: Vec<SegmentRecord>,
}

#[derive(Debug, Deserialize)]
struct SegmentRecord {
    #[serde(default)]
    index: Option<usize>,
    coefficients: [f64; 4],
    first: [f64; 2],
    last: [f64; 2],
    #[serde(default)]
    previous: Option<usize>,
}

/// Parse a chain from JSON text.
pub fn parse_chain(text: &str, config: ChainConfig) -> Result<Chain, ChainError> {
    let file: ChainFile = serde_json::from_str(text)?;
    let segments = file
        .segments
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            CubicSegment::new(
                record.index.unwrap_or(position),
                record.coefficients,
                Point::new(record.first[0], record.first[1]),
                Point::new(record.last[0], record.last[1]),
                record.previous,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Chain::new(segments, config)
}

/// Load a chain from a JSON file.
pub fn load_chain(path: &Path, config: ChainConfig) -> Result<Chain, ChainError> {
    let text = std::fs::read_to_string(path)?;
    parse_chain(&text, config)
}
