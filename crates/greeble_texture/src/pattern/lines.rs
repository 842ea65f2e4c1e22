use greeble_core::{RngExt, Tone};
use greeble_paint::{LineCap, LineJoin, LineStyle, PaintError, Surface};
use rand::RngCore;

use super::{layer, Pattern, LINES_MIN_SIZE};

const BRUSH: f32 = 5.0;
const BRUSH_LIGHT: f32 = 7.0;
const LIGHT_SPACING_SCALE: f32 = 1.6;
const EDGE_MARGIN: i32 = 18;
const OVERHANG: i32 = 8;
const SPAN: f32 = 0.4;

/// A short bundle of parallel strokes
///
/// Light tones get a heavier brush and wider spacing so they read as raised
/// ridges rather than grooves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lines {
    pub tone: Tone,
    pub spacing: f32,
    pub horizontal: bool,
    pub count: u32,
}

impl Lines {
    pub fn new(tone: Tone, spacing: f32, horizontal: bool, count: u32) -> Self {
        Self {
            tone,
            spacing,
            horizontal,
            count,
        }
    }

    /// Brush width and effective spacing for the tone
    fn stroke_metrics(&self) -> (f32, f32) {
        if self.tone.is_light() {
            (BRUSH_LIGHT, self.spacing * LIGHT_SPACING_SCALE)
        } else {
            (BRUSH, self.spacing)
        }
    }
}

impl Pattern for Lines {
    fn min_size(&self) -> i32 {
        LINES_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let (brush, spacing) = self.stroke_metrics();
        let style = LineStyle::new(brush)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Miter);

        // Work in (along, across): `along` is the axis the bundle steps on
        let (along, across) = if self.horizontal {
            (height, width)
        } else {
            (width, height)
        };

        let extent = (f64::from(across) * rng.uniform(0.3, 0.8)).floor() as i32;
        let (start, offset) = if self.horizontal {
            let offset = rng.randint(0, across - extent + 2 * OVERHANG) - OVERHANG;
            (EDGE_MARGIN + rng.randint(0, along / 3), offset)
        } else {
            let start = EDGE_MARGIN + rng.randint(0, along / 3);
            (start, rng.randint(0, across - extent + 2 * OVERHANG) - OVERHANG)
        };
        let stop = (along - EDGE_MARGIN) as f32;
        let span = across as f32 * SPAN;

        let mut surface = layer(width, height)?;
        let mut pos = start as f32;
        for _ in 0..self.count {
            if pos >= stop {
                break;
            }
            let (a0, a1) = (offset as f32, offset as f32 + span);
            if self.horizontal {
                surface.stroke_line(a0, pos, a1, pos, &style, self.tone);
            } else {
                surface.stroke_line(pos, a0, pos, a1, &style, self.tone);
            }
            pos += spacing;
        }

        Ok(Some(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeble_core::rng::seeded;

    #[test]
    fn test_light_tones_use_heavier_brush() {
        let dark = Lines::new(Tone::BLACK, 12.0, false, 5);
        assert_eq!(dark.stroke_metrics(), (5.0, 12.0));

        let light = Lines::new(Tone::new(0.55), 12.0, false, 5);
        let (brush, spacing) = light.stroke_metrics();
        assert_eq!(brush, 7.0);
        assert!((spacing - 19.2).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_bundle_stays_in_band() {
        let mut rng = seeded(14);
        let lines = Lines::new(Tone::BLACK, 12.0, false, 8);
        let surface = lines.draw(200, 120, &mut rng).unwrap().unwrap();

        // Bundle starts after the edge margin and never reaches the far margin
        for y in 0..120 {
            for x in 0..(EDGE_MARGIN as u32 - 4) {
                assert_eq!(surface.alpha_at(x, y), Some(0.0));
            }
            for x in (200 - EDGE_MARGIN as u32 + 4)..200 {
                assert_eq!(surface.alpha_at(x, y), Some(0.0));
            }
        }
        assert!(surface.to_rgba8().chunks(4).any(|px| px[3] == 255));
    }

    #[test]
    fn test_horizontal_bundle_is_drawn() {
        let mut rng = seeded(15);
        let lines = Lines::new(Tone::new(0.6), 12.0, true, 3);
        let surface = lines.draw(90, 160, &mut rng).unwrap().unwrap();
        let opaque = surface
            .to_rgba8()
            .chunks(4)
            .filter(|px| px[3] == 255)
            .count();
        assert!(opaque > 0);
    }

    #[test]
    fn test_small_cell_guard() {
        let mut rng = seeded(1);
        let lines = Lines::new(Tone::BLACK, 12.0, false, 4);
        let area = greeble_core::Area::new(0, 0, 10, 10);
        assert!(lines.render(&area, &mut rng).unwrap().is_none());
    }
}
