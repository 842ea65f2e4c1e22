//! Greeble texture generator
//!
//! Turns a [`GenerationParams`] into a grayscale sci-fi panel texture: the
//! canvas is partitioned into jittered cells, each cell becomes a rounded
//! panel decorated with one of eight patterns and optional corner rivets,
//! and everything is composited onto a single [`Canvas`].
//!
//! # Example
//!
//! ```ignore
//! use greeble_texture::{generate, DrawType, GenerationParams};
//!
//! let params = GenerationParams::default()
//!     .with_size(1024, 1024)
//!     .with_seed(7)
//!     .with_draw_type(DrawType::All);
//!
//! let canvas = generate(&params)?;
//! let gray: Vec<u8> = canvas.to_gray8();
//! ```
//!
//! # Patterns
//!
//! | Kind            | Weight | Guard |
//! |-----------------|--------|-------|
//! | `lines`         | 4      | 28    |
//! | `box`           | 4      | 20    |
//! | `box-fill`      | 2      | 28    |
//! | `box-fill-b`    | 2      | 28    |
//! | `grid`          | 2      | 60    |
//! | `angled-line-a` | 2      | 28    |
//! | `angled-line-b` | 2      | > 48  |
//! | `angled-line-c` | 2      | > 48  |

pub mod boxes;
pub mod compositor;
pub mod error;
pub mod pattern;
pub mod rivet;

pub use boxes::{render_boxes, BoxesParams};
pub use compositor::{composite, generate, generate_with_stats, CompositeStats};
pub use error::{GenerateError, Result};
pub use pattern::{CellStyle, Pattern, PATTERN_WEIGHTS};

// Re-export the parameter types callers need
pub use greeble_core::{
    DrawType, FillTone, GenerationParams, PatternKind, RivetKind, RivetParams, Tone,
};
pub use greeble_paint::Canvas;
