//! Paint error types

use thiserror::Error;

/// Errors that can occur when allocating or compositing surfaces
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    /// Surface dimensions tiny-skia cannot allocate
    #[error("Invalid surface size {width}x{height}: dimensions must be > 0")]
    InvalidSize { width: u32, height: u32 },

    /// Clip mask could not be built
    #[error("Clip mask error: {0}")]
    Mask(String),
}
