use thiserror::Error;

/// Errors raised when a segment chain breaks its construction contract.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChainError {
    #[error("segment {index} has non-positive width {width}")]
    NonPositiveWidth { index: usize, width: f64 },

    #[error("segment {index} has a non-finite coefficient or endpoint")]
    NonFinite { index: usize },

    #[error("sample distance must be positive and finite, got {0}")]
    InvalidSampleDistance(f64),

    #[error("sample distance {dist} would produce {count} samples")]
    TooManySamples { dist: f64, count: f64 },

    #[error("segment chain is empty")]
    EmptyChain,

    #[error("segment at position {index} links to {previous}, which is not an earlier segment")]
    BrokenLink { index: usize, previous: usize },

    #[error("segment {index} out of range for chain of {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("failed to read chain: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse chain: {0}")]
    Parse(#[from] serde_json::Error),
}
