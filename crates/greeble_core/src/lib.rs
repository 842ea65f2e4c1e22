//! Greeble core types
//!
//! Shared building blocks for the sci-fi panel texture generator: integer
//! cell geometry, grayscale tones, generation parameters with validation,
//! seeded randomness and the recursive partitioner that cuts a canvas into
//! jittered panel cells.
//!
//! # Example
//!
//! ```ignore
//! use greeble_core::{rng, GenerationParams, Partitioner};
//!
//! let params = GenerationParams::default().with_seed(7);
//! params.validate()?;
//!
//! let mut rng = rng::seeded(params.seed);
//! let cells = Partitioner::from_params(&params).partition(params.width, params.height, &mut rng);
//! ```

pub mod error;
pub mod geometry;
pub mod params;
pub mod partition;
pub mod rng;
pub mod tone;

pub use error::ConfigError;
pub use geometry::{Area, CellRect};
pub use params::{
    DrawType, FillTone, GenerationParams, PatternKind, RivetKind, RivetParams, MAX_DEPTH,
};
pub use partition::{split, Axis, Partitioner, JITTER_FRACTION};
pub use rng::{RngExt, SeededRng};
pub use tone::Tone;
