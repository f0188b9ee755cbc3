//! polybez: chains of cubic polynomial segments → exact cubic bezier paths.
//!
//! An upstream fitting process approximates an ordered run of 2-D samples
//! with cubic polynomials `y = f(x - first.x) + first.y`, each segment
//! linked to the one it continues. This crate measures how well each
//! segment explains the history behind it and re-expresses the chain as a
//! single kurbo path for rendering.
//!
//! # Example
//!
//! ```
//! use polybez::{kurbo::Point, Chain, ChainConfig, CubicSegment};
//!
//! let line = CubicSegment::new(
//!     0,
//!     [0.0, 0.0, 1.0, 0.0],
//!     Point::new(0.0, 0.0),
//!     Point::new(3.0, 3.0),
//!     None,
//! )?;
//! let chain = Chain::new(vec![line], ChainConfig::default())?;
//! let path = chain.path_to(chain.terminal())?;
//! assert_eq!(path.len(), 1);
//! # Ok::<(), polybez::ChainError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod metric;
mod segment;

pub mod bezier;
pub mod chain;
pub mod error;
pub mod input;
pub mod report;

// Re-export kurbo so downstream users get the same version
// used by ChainPath and the segment endpoints.
pub use kurbo;

pub use bezier::{assemble_path, collect_endpoints, control_points, ChainPath, PathAssembler};
pub use chain::Chain;
pub use config::ChainConfig;
pub use error::ChainError;
pub use metric::ErrorMetric;
pub use segment::CubicSegment;
