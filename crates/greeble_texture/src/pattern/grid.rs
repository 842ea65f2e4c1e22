use greeble_core::{RngExt, Tone};
use greeble_paint::{LineCap, LineJoin, LineStyle, PaintError, Surface};
use rand::RngCore;

use super::{layer, Pattern, GRID_MIN_SIZE};

const RULE_WIDTH: f32 = 5.0;
const DIVIDER_WIDTH: f32 = 3.0;
const MARGIN_X: f32 = 12.0;
const MARGIN_Y: f32 = 8.0;
const RULE_OFFSET: f32 = 3.5;
const DIVIDER_OVERHANG: f32 = 3.0;

/// Horizontal rules cut into columns by dividers in the cell tone
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub foreground: Tone,
    pub background: Tone,
    pub spacing: f32,
}

impl Grid {
    pub fn new(foreground: Tone, background: Tone, spacing: f32) -> Self {
        Self {
            foreground,
            background,
            spacing,
        }
    }
}

impl Pattern for Grid {
    fn min_size(&self) -> i32 {
        GRID_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let columns = rng.randint(3, 6);
        let (w, h) = (width as f32, height as f32);
        let mut surface = layer(width, height)?;

        let rule = LineStyle::new(RULE_WIDTH)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Miter);
        let (x0, x1) = (MARGIN_X, w - MARGIN_X);
        let mut y = MARGIN_Y + RULE_OFFSET;
        let stop = h - MARGIN_Y + RULE_OFFSET;
        if self.spacing > 0.0 {
            while y < stop {
                surface.stroke_line(x0, y, x1, y, &rule, self.foreground);
                y += self.spacing;
            }
        }

        let divider = LineStyle::new(DIVIDER_WIDTH)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Miter);
        let left = x0 - DIVIDER_OVERHANG;
        let step = (x1 + DIVIDER_OVERHANG - left) / columns as f32;
        for i in 1..columns {
            let x = left + step * i as f32;
            surface.stroke_line(x, 0.0, x, h, &divider, self.background);
        }

        Ok(Some(surface))
    }
}
