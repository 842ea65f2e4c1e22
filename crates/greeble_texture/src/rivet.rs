//! Corner rivets
//!
//! Rivets are drawn after the cell pattern and clipped the same way. They
//! consume no randomness, and all four corners share one set of tones.

use greeble_core::{RivetKind, RivetParams, Tone};
use greeble_paint::{PaintError, Surface};
use rand::RngCore;

use crate::pattern::{layer, Pattern};

/// Smallest drawable side that gets box rivets
pub const RIVET_BOX_MIN_SIZE: i32 = 64;
/// Smallest drawable side that gets circle rivets
pub const RIVET_CIRCLE_MIN_SIZE: i32 = 36;

/// Extra radius of the outer background ring
const RING_OUTER: f32 = 3.0;
/// Extra radius of the recessed seat under the dome
const RING_INNER: f32 = 1.0;

/// Flat vertical bars, one per corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RivetBox {
    pub size: i32,
    pub spacing: i32,
}

impl RivetBox {
    pub fn new(size: i32, spacing: i32) -> Self {
        Self { size, spacing }
    }

    /// Bar centres, clockwise from top-left
    pub fn marks(&self, width: i32, height: i32) -> [(i32, i32); 4] {
        let half = f64::from(self.spacing) / 2.0;
        let left = half.floor() as i32;
        let right = (f64::from(width) - half).floor() as i32;
        let top = self.spacing;
        let bottom = height - self.spacing - 1;
        [(left, top), (right, top), (right, bottom), (left, bottom)]
    }

    /// Bar width and height
    pub fn bar(&self) -> (i32, i32) {
        ((self.size / 4).max(2), self.size)
    }
}

impl Pattern for RivetBox {
    fn min_size(&self) -> i32 {
        RIVET_BOX_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        _rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let (bw, bh) = self.bar();
        let mut surface = layer(width, height)?;
        for (x, y) in self.marks(width, height) {
            surface.fill_rect_xywh(
                (x - bw / 2) as f32,
                (y - bh / 2) as f32,
                bw as f32,
                bh as f32,
                Tone::BLACK,
            );
        }
        Ok(Some(surface))
    }
}

/// Shaded domes whose height falls off like a hemisphere
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RivetCircle {
    pub size: i32,
    pub spacing: i32,
    /// Dome height on the 0..=255 scale
    pub height: u8,
    /// Draw a ring in the cell tone and a recessed seat under each dome
    pub background: bool,
    /// Tone of the cell the rivets sit on
    pub cell_tone: Tone,
}

impl RivetCircle {
    pub fn new(size: i32, spacing: i32, height: u8, background: bool, cell_tone: Tone) -> Self {
        Self {
            size,
            spacing,
            height,
            background,
            cell_tone,
        }
    }

    /// Dome centres, clockwise from top-left
    pub fn marks(&self, width: i32, height: i32) -> [(i32, i32); 4] {
        let near = self.spacing;
        let right = width - self.spacing - 1;
        let bottom = height - self.spacing - 1;
        [(near, near), (right, near), (right, bottom), (near, bottom)]
    }

    fn height_scale(&self) -> f64 {
        f64::from(self.height) / 256.0
    }

    /// Tone the dome rises from
    pub fn base_tone(&self) -> Tone {
        if self.background {
            Tone::new(self.cell_tone.value() - self.height_scale())
        } else {
            self.cell_tone
        }
    }

    /// Concentric discs from the rim inwards as (radius, tone)
    pub fn dome(&self) -> Vec<(f32, Tone)> {
        let rim = f64::from(self.size) / 2.0;
        let base = self.base_tone().value();
        let peak = self.height_scale();

        let mut discs = Vec::new();
        let mut r = rim;
        while r >= 1.0 {
            let rise = (rim * rim - r * r).sqrt() * peak / rim;
            discs.push((r as f32, Tone::new((base + rise).min(1.0))));
            r -= 1.0;
        }
        discs
    }
}

impl Pattern for RivetCircle {
    fn min_size(&self) -> i32 {
        RIVET_CIRCLE_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        _rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let marks = self.marks(width, height);
        let rim = self.size as f32 / 2.0;
        let mut surface = layer(width, height)?;

        let mut rings = Vec::with_capacity(2);
        if self.background {
            rings.push((rim + RING_OUTER, self.cell_tone));
            rings.push((rim + RING_INNER, self.base_tone()));
        }

        for (radius, tone) in rings.into_iter().chain(self.dome()) {
            for (x, y) in marks {
                surface.fill_circle_xyr(x as f32, y as f32, radius, tone);
            }
        }
        Ok(Some(surface))
    }
}

/// The rivet layer configured by `params` for a cell filled with `cell_tone`
pub fn for_params(params: &RivetParams, cell_tone: Tone) -> Box<dyn Pattern> {
    match params.kind {
        RivetKind::Box => Box::new(RivetBox::new(params.size, params.spacing)),
        RivetKind::Circle => Box::new(RivetCircle::new(
            params.size,
            params.spacing,
            params.height,
            params.background,
            cell_tone,
        )),
    }
}
