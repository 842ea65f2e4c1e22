//! Cell compositing
//!
//! The canvas starts as a flat sheet in the border tone. Each leaf cell is
//! inset by the spacing, filled as a rounded panel, decorated with one
//! pattern and optional rivets, and both layers are painted back through
//! the panel's rounded-rect clip.
//!
//! Randomness is drawn in a fixed order per cell: fill tone, pattern pick,
//! pattern parameters, then whatever the pattern draws itself. Cells that
//! are skipped draw nothing.

use greeble_core::{
    rng, Area, CellRect, DrawType, FillTone, GenerationParams, Partitioner, RngExt, Tone,
};
use greeble_paint::{Canvas, RoundedRect, Surface};
use rand::RngCore;

use crate::error::Result;
use crate::pattern::{self, CellStyle, Pattern};
use crate::rivet;

/// Lower bound of the random panel tone
pub const FILL_TONE_FLOOR: f64 = 0.25;
/// Range added on top of [`FILL_TONE_FLOOR`], on the 0..256 scale
pub const FILL_TONE_RANGE: (f64, f64) = (24.0 / 256.0, 80.0 / 256.0);

/// Counters for one compositing pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    pub cells: usize,
    pub skipped: usize,
    pub patterns: usize,
    pub rivets: usize,
}

/// Generate a texture from parameters alone
///
/// Validates, seeds the run generator from `params.seed`, partitions the
/// canvas and composites every cell. Identical parameters always produce
/// pixel-identical canvases.
pub fn generate(params: &GenerationParams) -> Result<Canvas> {
    generate_with_stats(params).map(|(canvas, _)| canvas)
}

/// [`generate`], also reporting what happened to the cells
pub fn generate_with_stats(params: &GenerationParams) -> Result<(Canvas, CompositeStats)> {
    params.validate()?;

    let mut rng = rng::seeded(params.seed);
    let cells = Partitioner::from_params(params).partition(params.width, params.height, &mut rng);

    let span = tracing::debug_span!("generate", seed = params.seed, cells = cells.len());
    let _enter = span.enter();

    run(params.width, params.height, &cells, params, &mut rng)
}

/// Composite an explicit cell list onto a new canvas
///
/// `params` supplies everything except the cells and canvas size; its seed
/// is ignored in favour of `rng`. The parameters are still validated as a
/// whole before anything is drawn.
pub fn composite<R: RngCore>(
    width: u32,
    height: u32,
    cells: &[CellRect],
    params: &GenerationParams,
    rng: &mut R,
) -> Result<Canvas> {
    params.validate()?;
    run(width, height, cells, params, rng).map(|(canvas, _)| canvas)
}

fn run<R: RngCore>(
    width: u32,
    height: u32,
    cells: &[CellRect],
    params: &GenerationParams,
    rng: &mut R,
) -> Result<(Canvas, CompositeStats)> {
    let mut compositor = Compositor::new(width, height, params)?;
    for cell in cells {
        compositor.paint_cell(cell, rng)?;
    }

    let stats = compositor.stats;
    tracing::debug!(
        "Composited {} cells ({} skipped, {} patterns, {} rivet layers)",
        stats.cells,
        stats.skipped,
        stats.patterns,
        stats.rivets
    );
    Ok((compositor.canvas, stats))
}

/// Owns the canvas for the duration of one pass
struct Compositor<'a> {
    params: &'a GenerationParams,
    canvas: Canvas,
    stats: CompositeStats,
}

impl<'a> Compositor<'a> {
    fn new(width: u32, height: u32, params: &'a GenerationParams) -> Result<Self> {
        let mut canvas = Surface::new(width, height)?;
        canvas.clear(params.border_tone);
        Ok(Self {
            params,
            canvas,
            stats: CompositeStats::default(),
        })
    }

    /// Drawable area of a cell, None when nothing can be drawn
    fn drawable(&self, cell: &CellRect) -> Option<Area> {
        let area = cell.inset(self.params.spacing);
        let off_canvas = i64::from(area.x0) >= i64::from(self.canvas.width())
            || i64::from(area.y0) >= i64::from(self.canvas.height());
        if area.is_empty() || off_canvas {
            None
        } else {
            Some(area)
        }
    }

    fn fill_tone(&self, rng: &mut dyn RngCore) -> Tone {
        match self.params.fill {
            FillTone::Fixed(tone) => tone,
            FillTone::Random => {
                let (lo, hi) = FILL_TONE_RANGE;
                Tone::new(FILL_TONE_FLOOR + rng.uniform(lo, hi))
            }
        }
    }

    fn paint_cell<R: RngCore>(&mut self, cell: &CellRect, rng: &mut R) -> Result<()> {
        let rng: &mut dyn RngCore = rng;
        self.stats.cells += 1;

        let Some(area) = self.drawable(cell) else {
            tracing::trace!("Skipping cell {:?}: no drawable area", cell);
            self.stats.skipped += 1;
            return Ok(());
        };

        let tone = self.fill_tone(rng);
        let clip = RoundedRect::from_area(&area, self.params.corner_radius);
        self.canvas.fill_rounded_rect(&clip, tone);

        let kind = match self.params.draw_type {
            DrawType::RectOnly => return Ok(()),
            DrawType::All => pattern::pick_weighted(rng),
            DrawType::Single(kind) => kind,
        };

        let style = CellStyle {
            fill: tone,
            border: self.params.border_tone,
            spacing: self.params.spacing,
        };
        let decoration = pattern::instantiate(kind, &style, rng);
        if self.paint_layer(decoration.as_ref(), &area, &clip, rng)? {
            self.stats.patterns += 1;
        } else {
            tracing::trace!("Pattern {} drew nothing in {:?}", kind, area);
        }

        if self.params.rivet.enabled {
            let rivets = rivet::for_params(&self.params.rivet, tone);
            if self.paint_layer(rivets.as_ref(), &area, &clip, rng)? {
                self.stats.rivets += 1;
            }
        }

        Ok(())
    }

    /// Render one layer and paint it through the clip; false when empty
    fn paint_layer(
        &mut self,
        layer: &dyn Pattern,
        area: &Area,
        clip: &RoundedRect,
        rng: &mut dyn RngCore,
    ) -> Result<bool> {
        match layer.render(area, rng)? {
            Some(surface) => {
                self.canvas.composite(&surface, area.x0, area.y0, clip)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeble_core::{ConfigError, PatternKind, RivetParams};

    use crate::error::GenerateError;

    fn quadrant_params() -> GenerationParams {
        let mut params = GenerationParams::default()
            .with_size(256, 256)
            .with_splits(2, 2, 1)
            .with_draw_type(DrawType::RectOnly)
            .with_fill(FillTone::Fixed(Tone::new(0.5)));
        params.spacing = 0;
        params.corner_radius = 0;
        params
    }

    #[test]
    fn test_rect_only_quadrants() {
        let params = quadrant_params();
        let mut rng = rng::seeded(params.seed);
        let cells = Partitioner::from_params(&params).partition(256, 256, &mut rng);
        assert_eq!(cells.len(), 4);

        let canvas = generate(&params).unwrap();
        let border = params.border_tone.to_u8();

        for cell in &cells {
            for y in cell.y0..cell.y1 {
                for x in cell.x0..cell.x1 {
                    assert_eq!(canvas.level_at(x as u32, y as u32), Some(128));
                }
            }
        }

        // The partition covers 0..255, leaving the last row and column bare
        for i in 0..256 {
            assert_eq!(canvas.level_at(255, i), Some(border));
            assert_eq!(canvas.level_at(i, 255), Some(border));
        }
    }

    #[test]
    fn test_rect_only_ignores_rivets() {
        let mut params = quadrant_params();
        params.rivet = RivetParams::default();
        let with_rivets = generate(&params).unwrap();

        params.rivet = RivetParams::disabled();
        assert_eq!(with_rivets, generate(&params).unwrap());
    }

    #[test]
    fn test_single_cell() {
        let params = GenerationParams::default()
            .with_size(128, 96)
            .with_splits(1, 1, 5)
            .with_draw_type(DrawType::RectOnly)
            .with_fill(FillTone::Fixed(Tone::new(0.75)));
        let canvas = generate(&params).unwrap();

        // Spacing 2 on the single cell (0, 0)..(127, 95)
        assert_eq!(canvas.level_at(64, 48), Some(191));
        assert_eq!(canvas.level_at(0, 48), Some(params.border_tone.to_u8()));
        assert_eq!(canvas.level_at(1, 48), Some(params.border_tone.to_u8()));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let params = GenerationParams::default().with_size(192, 160).with_seed(1234);
        let a = generate(&params).unwrap();
        let b = generate(&params).unwrap();
        assert_eq!(a, b);

        let c = generate(&params.clone().with_seed(1235)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_every_pattern_composites() {
        for kind in PatternKind::ALL {
            let mut params = GenerationParams::default()
                .with_size(256, 256)
                .with_splits(2, 2, 0)
                .with_fill(FillTone::Fixed(Tone::new(0.4)))
                .with_rivets(RivetParams::disabled())
                .with_seed(17);
            params.corner_radius = 0;

            let plain = generate(&params.clone().with_draw_type(DrawType::RectOnly)).unwrap();
            let decorated = generate(&params.with_draw_type(DrawType::Single(kind))).unwrap();
            assert_ne!(plain, decorated, "{} left no trace", kind);
        }
    }

    #[test]
    fn test_tiny_cell_lines_fallback() {
        let mut params = GenerationParams::default()
            .with_size(20, 20)
            .with_splits(1, 1, 0)
            .with_draw_type(DrawType::Single(PatternKind::Lines))
            .with_fill(FillTone::Fixed(Tone::new(0.5)));
        params.spacing = 4;
        params.corner_radius = 0;

        // Drawable area is 11x11: fill only, no pattern, no rivets
        let canvas = generate(&params).unwrap();
        for y in 4..15 {
            for x in 4..15 {
                assert_eq!(canvas.level_at(x, y), Some(128));
            }
        }
    }

    #[test]
    fn test_stats_count_cells() {
        let params = GenerationParams::default().with_size(200, 200).with_seed(3);
        let (_, stats) = generate_with_stats(&params).unwrap();

        let mut rng = rng::seeded(3);
        let cells = Partitioner::from_params(&params).partition(200, 200, &mut rng);
        assert_eq!(stats.cells, cells.len());
        assert!(stats.patterns + stats.skipped <= stats.cells);
    }

    #[test]
    fn test_composite_skips_degenerate_cells() {
        let params = quadrant_params();
        let cells = [
            CellRect::new(0, 0, 0, 40),
            CellRect::new(300, 300, 400, 400),
            CellRect::new(10, 10, 50, 50),
        ];
        let mut rng = rng::seeded(1);
        let canvas = composite(64, 64, &cells, &params, &mut rng).unwrap();
        assert_eq!(canvas.level_at(20, 20), Some(128));
        assert_eq!(canvas.level_at(60, 60), Some(params.border_tone.to_u8()));
    }

    #[test]
    fn test_composite_rejects_negative_spacing() {
        let mut params = quadrant_params();
        params.spacing = -4;
        let cells = [CellRect::new(0, 0, 32, 32), CellRect::new(32, 0, 64, 32)];
        let mut rng = rng::seeded(1);
        assert_eq!(
            composite(64, 64, &cells, &params, &mut rng).unwrap_err(),
            GenerateError::InvalidConfig(ConfigError::NegativeSpacing(-4))
        );
    }

    #[test]
    fn test_random_fill_range() {
        let params = GenerationParams::default()
            .with_size(256, 256)
            .with_splits(2, 3, 2)
            .with_draw_type(DrawType::RectOnly)
            .with_rivets(RivetParams::disabled());
        let canvas = generate(&params).unwrap();

        let lo = Tone::new(FILL_TONE_FLOOR + FILL_TONE_RANGE.0).to_u8();
        let hi = Tone::new(FILL_TONE_FLOOR + FILL_TONE_RANGE.1).to_u8();
        let levels = canvas.to_gray8();

        // Corner anti-aliasing blends towards the border, never above a panel
        assert!(levels.iter().all(|&v| v <= hi));
        assert!(levels.iter().any(|&v| (lo..=hi).contains(&v)));
    }

    #[test]
    fn test_invalid_params_fail_early() {
        let params = GenerationParams::default().with_size(0, 64);
        assert_eq!(
            generate(&params).unwrap_err(),
            GenerateError::InvalidConfig(ConfigError::EmptyCanvas {
                width: 0,
                height: 64
            })
        );

        let params = GenerationParams::default().with_splits(0, 3, 2);
        assert!(matches!(
            generate(&params),
            Err(GenerateError::InvalidConfig(ConfigError::ZeroSplits { .. }))
        ));
    }
}
