//! Configuration error types

use thiserror::Error;

/// Errors raised when generation parameters are rejected up front
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Canvas has no pixels
    #[error("Invalid canvas size {width}x{height}: both dimensions must be > 0")]
    EmptyCanvas { width: u32, height: u32 },

    /// Split counts must be at least one
    #[error("Invalid split range {dmin}..={dmax}: split counts must be > 0")]
    ZeroSplits { dmin: u32, dmax: u32 },

    /// Recursion depth beyond what the partitioner accepts
    #[error("Subdivision depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },

    /// Negative spacing margin
    #[error("Invalid spacing {0}: must be >= 0")]
    NegativeSpacing(i32),

    /// Negative corner radius
    #[error("Invalid corner radius {0}: must be >= 0")]
    NegativeRadius(i32),

    /// Rivet geometry that cannot be drawn
    #[error("Invalid rivet settings: {0}")]
    InvalidRivet(String),

    /// Worst case leaf count is over the configured cap
    #[error("Subdivision could produce {estimate} cells, over the limit of {limit}")]
    TooManyCells { estimate: u64, limit: u64 },

    /// Unknown name for a pattern, draw type or rivet kind
    #[error("Unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },
}
