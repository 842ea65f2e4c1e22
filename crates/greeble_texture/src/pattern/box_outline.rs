use greeble_core::{RngExt, Tone};
use greeble_paint::{LineCap, LineJoin, LineStyle, PaintError, Surface};
use rand::RngCore;

use super::{layer, Pattern, BOX_MIN_SIZE};

/// Overhang past the layer edge allowed for the outline origin
const OVERHANG: i32 = 8;

/// One stroked rectangle, 40-80% of the cell on each side
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxOutline {
    pub tone: Tone,
}

impl BoxOutline {
    pub fn new(tone: Tone) -> Self {
        Self { tone }
    }
}

impl Pattern for BoxOutline {
    fn min_size(&self) -> i32 {
        BOX_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let w1 = (f64::from(width) * 0.4).floor() as i32;
        let h1 = (f64::from(height) * 0.4).floor() as i32;
        let bw = w1 + rng.randint(0, w1);
        let bh = h1 + rng.randint(0, h1);
        let x = rng.randint(0, width - bw + 2 * OVERHANG) - OVERHANG;
        let y = rng.randint(0, height - bh + 2 * OVERHANG) - OVERHANG;
        let brush = rng.randint(1, 2) as f32;

        let style = LineStyle::new(brush)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Miter);

        let mut surface = layer(width, height)?;
        surface.stroke_rect_xywh(x as f32, y as f32, bw as f32, bh as f32, &style, self.tone);
        Ok(Some(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeble_core::rng::seeded;

    #[test]
    fn test_outline_leaves_interior_clear() {
        let mut rng = seeded(31);
        let surface = BoxOutline::new(Tone::new(0.1))
            .draw(100, 100, &mut rng)
            .unwrap()
            .unwrap();

        // Only the outline is drawn, never the interior
        let drawn = surface.to_rgba8().chunks(4).filter(|px| px[3] > 0).count();
        assert!(drawn > 0);
        assert!(drawn < 100 * 100 / 4);
    }
}
