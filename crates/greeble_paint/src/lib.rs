//! Greeble raster surfaces
//!
//! A small Canvas-style drawing API over `tiny-skia`, specialised for
//! grayscale bump textures. Every color is a [`Tone`]; surfaces keep an
//! alpha channel so pattern layers can be rendered in isolation and then
//! composited through a rounded-rect clip.
//!
//! # Example
//!
//! ```ignore
//! use greeble_paint::{LineStyle, RoundedRect, Surface, Tone};
//!
//! let mut canvas = Surface::new(256, 256)?;
//! canvas.clear(Tone::new(0.25));
//!
//! let mut layer = Surface::new(100, 60)?;
//! layer.stroke_line(10.0, 10.0, 90.0, 50.0, &LineStyle::new(3.0), Tone::BLACK);
//!
//! let clip = RoundedRect::new(20.0, 20.0, 120.0, 80.0, 4.0);
//! canvas.fill_rounded_rect(&clip, Tone::new(0.5));
//! canvas.composite(&layer, 20, 20, &clip)?;
//! ```

pub mod error;
pub mod export;
pub mod path;
pub mod primitives;
pub mod surface;

pub use error::PaintError;
pub use path::{polar_offset, PathBuilder};
pub use primitives::{Circle, LineStyle, Point, RoundedRect};
pub use surface::{Canvas, Surface};

// Stroke types come straight from tiny-skia
pub use tiny_skia::{LineCap, LineJoin};

// Tones are shared with the rest of the workspace
pub use greeble_core::Tone;
