//! Generation error types

use greeble_core::ConfigError;
use greeble_paint::PaintError;
use thiserror::Error;

/// Errors that stop a texture from being generated
///
/// Geometric edge cases inside a run never surface here; a cell that is
/// too small is simply skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// Parameters rejected before any drawing started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Canvas or layer allocation failed
    #[error("Surface error: {0}")]
    Surface(#[from] PaintError),
}

/// Result type for generation
pub type Result<T> = std::result::Result<T, GenerateError>;
