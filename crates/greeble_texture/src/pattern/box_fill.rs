//! Mosaic fills
//!
//! Both variants reuse the partitioner's single-level [`split`] to carve the
//! cell into sub-panels and shade those a little darker or lighter than the
//! cell itself. The direction is drawn once per cell so the whole mosaic
//! either sinks or rises.

use greeble_core::{split, Axis, CellRect, RngExt, Tone, JITTER_FRACTION};
use greeble_paint::{PaintError, Surface};
use rand::RngCore;

use super::{layer, shifted_tone, Pattern, BOX_FILL_MIN_SIZE};

const BOX_FILL_INSET: i32 = 4;
const BOX_FILL_MIN_INNER: i32 = 10;

const MOSAIC_INSET: i32 = 8;
const MOSAIC_TILE_INSET: i32 = 3;
const MOSAIC_KEEP_PROBABILITY: f64 = 0.6;

/// A shaded rectangle placed inside each sub-panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxFill {
    pub base: Tone,
}

impl BoxFill {
    pub fn new(base: Tone) -> Self {
        Self { base }
    }

    /// Rectangles and tones to fill, in layer coordinates
    pub fn plan(&self, width: i32, height: i32, rng: &mut dyn RngCore) -> Vec<(CellRect, Tone)> {
        let darker = rng.unit() <= 0.5;
        let d = rng.randint(2, 4) as u32;
        let panels = split(CellRect::new(0, 0, width, height), d, Axis::Auto, JITTER_FRACTION, rng);

        let mut fills = Vec::with_capacity(panels.len());
        for panel in panels {
            let inner_w = panel.width() - BOX_FILL_INSET * 2;
            let inner_h = panel.height() - BOX_FILL_INSET * 2;
            if inner_w <= BOX_FILL_MIN_INNER || inner_h <= BOX_FILL_MIN_INNER {
                continue;
            }

            let tone = shifted_tone(self.base, darker, 0.05, 0.3, rng);
            let w = (f64::from(rng.randint(3, 7)) * f64::from(inner_w) / 10.0).floor() as i32;
            let h = (f64::from(rng.randint(3, 7)) * f64::from(inner_h) / 10.0).floor() as i32;
            let x = panel.x0 + BOX_FILL_INSET + rng.randint(0, inner_w - w);
            let y = panel.y0 + BOX_FILL_INSET + rng.randint(0, inner_h - h);
            fills.push((CellRect::new(x, y, x + w, y + h), tone));
        }
        fills
    }
}

impl Pattern for BoxFill {
    fn min_size(&self) -> i32 {
        BOX_FILL_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let fills = self.plan(width, height, rng);
        let mut surface = layer(width, height)?;
        paint_fills(&mut surface, &fills);
        Ok(Some(surface))
    }
}

/// Two-level mosaic of tiles, some left at the base tone
///
/// At least one tile always differs from the base so the mosaic is visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxFillB {
    pub base: Tone,
}

impl BoxFillB {
    pub fn new(base: Tone) -> Self {
        Self { base }
    }

    /// Tiles and tones to fill, in layer coordinates; None when no tile fits
    ///
    /// Tiles are placed inside the inset region rather than at its
    /// unshifted origin, so the mosaic keeps the margin on every side
    /// instead of hugging the top-left corner.
    pub fn plan(&self, width: i32, height: i32, rng: &mut dyn RngCore) -> Option<Vec<(CellRect, Tone)>> {
        let region = CellRect::new(
            MOSAIC_INSET,
            MOSAIC_INSET,
            width - MOSAIC_INSET,
            height - MOSAIC_INSET,
        );
        if region.is_degenerate() {
            return None;
        }

        let darker = rng.unit() <= 0.5;
        let d = rng.randint(2, 3) as u32;
        let mut tiles = Vec::new();
        for panel in split(region, d, Axis::Auto, JITTER_FRACTION, rng) {
            let d = rng.randint(2, 3) as u32;
            for tile in split(panel, d, Axis::Auto, JITTER_FRACTION, rng) {
                let inner = tile.inset(MOSAIC_TILE_INSET).to_rect();
                if inner.width() > MOSAIC_TILE_INSET * 2 && inner.height() > MOSAIC_TILE_INSET * 2 {
                    tiles.push(inner);
                }
            }
        }
        if tiles.is_empty() {
            return None;
        }

        let tones = loop {
            let mut shifted = 0;
            let tones: Vec<Tone> = tiles
                .iter()
                .map(|_| {
                    if rng.unit() <= MOSAIC_KEEP_PROBABILITY {
                        self.base
                    } else {
                        shifted += 1;
                        shifted_tone(self.base, darker, 0.1, 0.5, rng)
                    }
                })
                .collect();
            if shifted > 0 {
                break tones;
            }
        };

        Some(tiles.into_iter().zip(tones).collect())
    }
}

impl Pattern for BoxFillB {
    fn min_size(&self) -> i32 {
        BOX_FILL_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let Some(fills) = self.plan(width, height, rng) else {
            return Ok(None);
        };
        let mut surface = layer(width, height)?;
        paint_fills(&mut surface, &fills);
        Ok(Some(surface))
    }
}

fn paint_fills(surface: &mut Surface, fills: &[(CellRect, Tone)]) {
    for (rect, tone) in fills {
        surface.fill_rect_xywh(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.width() as f32,
            rect.height() as f32,
            *tone,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeble_core::rng::seeded;

    #[test]
    fn test_box_fill_inside_layer() {
        for seed in 0..20 {
            let mut rng = seeded(seed);
            let base = Tone::new(0.45);
            let fills = BoxFill::new(base).plan(160, 120, &mut rng);
            assert!(!fills.is_empty());

            let darker = fills[0].1.value() < base.value();
            for (rect, tone) in &fills {
                assert!(rect.x0 >= BOX_FILL_INSET && rect.y0 >= BOX_FILL_INSET);
                assert!(rect.x1 <= 160 - BOX_FILL_INSET && rect.y1 <= 120 - BOX_FILL_INSET);
                assert!(!rect.is_degenerate());
                // Every panel moves the same way
                assert_eq!(tone.value() < base.value(), darker);
            }
        }
    }

    #[test]
    fn test_box_fill_b_offsets_at_least_one_tile() {
        for seed in 0..40 {
            let mut rng = seeded(seed);
            let base = Tone::new(0.5);
            let fills = BoxFillB::new(base).plan(200, 200, &mut rng).unwrap();
            assert!(fills.iter().any(|(_, tone)| *tone != base));
            for (rect, _) in &fills {
                assert!(rect.width() > 6 && rect.height() > 6);
                assert!(rect.x0 >= MOSAIC_INSET && rect.x1 <= 200 - MOSAIC_INSET);
                assert!(rect.y0 >= MOSAIC_INSET && rect.y1 <= 200 - MOSAIC_INSET);
            }
        }
    }

    #[test]
    fn test_box_fill_b_without_room() {
        let mut rng = seeded(3);
        assert!(BoxFillB::new(Tone::new(0.5)).plan(16, 40, &mut rng).is_none());

        // Region exists but every tile is too small after its own inset
        let mut rng = seeded(3);
        assert!(BoxFillB::new(Tone::new(0.5)).plan(28, 28, &mut rng).is_none());
    }

    #[test]
    fn test_box_fill_draws_shaded_pixels() {
        let mut rng = seeded(8);
        let surface = BoxFill::new(Tone::new(0.3))
            .draw(120, 120, &mut rng)
            .unwrap()
            .unwrap();
        assert!(surface.to_rgba8().chunks(4).any(|px| px[3] == 255));
    }
}
