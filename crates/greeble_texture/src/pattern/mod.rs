//! Panel patterns
//!
//! Every pattern renders into a fresh transparent surface sized to one
//! cell's drawable area, with the origin at the area's top-left corner. The
//! compositor then paints that layer through the cell's rounded-rect clip.
//!
//! A pattern that does not fit its area returns `None` without touching the
//! random stream, so skipped cells never shift later draws.

mod angled;
mod box_fill;
mod box_outline;
mod grid;
mod lines;

pub use angled::{AngledLineA, AngledLineB, AngledLineC};
pub use box_fill::{BoxFill, BoxFillB};
pub use box_outline::BoxOutline;
pub use grid::Grid;
pub use lines::Lines;

use greeble_core::{Area, PatternKind, RngExt, Tone};
use greeble_paint::{PaintError, Surface};
use rand::RngCore;

// ─────────────────────────────────────────────────────────────────────────────
// Size guards
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest drawable side for [`Lines`]
pub const LINES_MIN_SIZE: i32 = 28;
/// Smallest drawable side for [`BoxOutline`]
pub const BOX_MIN_SIZE: i32 = 20;
/// Smallest drawable side for [`BoxFill`] and [`BoxFillB`]
pub const BOX_FILL_MIN_SIZE: i32 = 28;
/// Smallest drawable side for [`Grid`]
pub const GRID_MIN_SIZE: i32 = 60;
/// Smallest drawable side for [`AngledLineA`]
pub const ANGLED_MIN_SIZE: i32 = 28;
/// Both sides must be strictly larger than 48 for [`AngledLineB`] and [`AngledLineC`]
pub const ANGLED_STEP_MIN_SIZE: i32 = 49;

/// Line spacing handed to [`Lines`] and [`Grid`]
pub const LINE_SPACING: f32 = 12.0;

/// Step height of [`AngledLineB`]
pub const ANGLED_STEP_HEIGHT: f32 = 12.0;

/// Selection weights used by `DrawType::All`, in table order
pub const PATTERN_WEIGHTS: [(PatternKind, u32); 8] = [
    (PatternKind::Lines, 4),
    (PatternKind::Box, 4),
    (PatternKind::BoxFill, 2),
    (PatternKind::BoxFillB, 2),
    (PatternKind::Grid, 2),
    (PatternKind::AngledLineA, 2),
    (PatternKind::AngledLineB, 2),
    (PatternKind::AngledLineC, 2),
];

/// Sum of [`PATTERN_WEIGHTS`]
pub const fn total_weight() -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < PATTERN_WEIGHTS.len() {
        total += PATTERN_WEIGHTS[i].1;
        i += 1;
    }
    total
}

/// Size guard for a pattern kind
pub const fn min_size(kind: PatternKind) -> i32 {
    match kind {
        PatternKind::Lines => LINES_MIN_SIZE,
        PatternKind::Box => BOX_MIN_SIZE,
        PatternKind::BoxFill | PatternKind::BoxFillB => BOX_FILL_MIN_SIZE,
        PatternKind::Grid => GRID_MIN_SIZE,
        PatternKind::AngledLineA => ANGLED_MIN_SIZE,
        PatternKind::AngledLineB | PatternKind::AngledLineC => ANGLED_STEP_MIN_SIZE,
    }
}

/// Map a roll in `0..total_weight()` to a kind by cumulative weight
pub fn kind_for_roll(roll: u32) -> PatternKind {
    let mut acc = 0;
    for (kind, weight) in PATTERN_WEIGHTS {
        acc += weight;
        if roll < acc {
            return kind;
        }
    }
    PATTERN_WEIGHTS[PATTERN_WEIGHTS.len() - 1].0
}

/// One weighted pick; always a single integer draw
pub fn pick_weighted(rng: &mut dyn RngCore) -> PatternKind {
    let roll = rng.randint(0, total_weight() as i32 - 1);
    kind_for_roll(roll.max(0) as u32)
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern trait
// ─────────────────────────────────────────────────────────────────────────────

/// A procedural decoration for one cell
pub trait Pattern {
    /// Smallest width and height this pattern draws into
    fn min_size(&self) -> i32;

    /// Whether an area of `width` x `height` passes the size guard
    fn fits(&self, width: i32, height: i32) -> bool {
        width >= self.min_size() && height >= self.min_size()
    }

    /// Draw into a new surface of exactly `width` x `height`
    ///
    /// Called only for sizes that pass [`Pattern::fits`]. `None` means the
    /// pattern found nothing to draw.
    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError>;

    /// Guard, then draw
    fn render(&self, area: &Area, rng: &mut dyn RngCore) -> Result<Option<Surface>, PaintError> {
        let (width, height) = (area.width(), area.height());
        if !self.fits(width, height) {
            tracing::trace!(
                "Pattern skipped: {}x{} below guard {}",
                width,
                height,
                self.min_size()
            );
            return Ok(None);
        }
        self.draw(width, height, rng)
    }
}

/// Fresh transparent layer for a pattern
pub(crate) fn layer(width: i32, height: i32) -> Result<Surface, PaintError> {
    Surface::new(width.max(0) as u32, height.max(0) as u32)
}

// ─────────────────────────────────────────────────────────────────────────────
// Instantiation
// ─────────────────────────────────────────────────────────────────────────────

/// Per-cell inputs a pattern may depend on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    /// Tone the cell was filled with
    pub fill: Tone,
    /// Canvas background tone
    pub border: Tone,
    /// Cell inset in pixels
    pub spacing: i32,
}

/// Build the pattern for `kind`, drawing its cell-level parameters
///
/// Lines draw their tone, count and orientation here; the box outline draws
/// its tone. Other kinds take no draws at this stage.
pub fn instantiate(kind: PatternKind, style: &CellStyle, rng: &mut dyn RngCore) -> Box<dyn Pattern> {
    let base = style.fill.value();
    match kind {
        PatternKind::Lines => {
            let tone = if rng.unit() <= 0.5 {
                Tone::BLACK
            } else {
                Tone::new(rng.uniform(base * 1.05, base * 1.2))
            };
            let count = rng.randint(3, 8) as u32;
            let horizontal = rng.unit() >= 0.5;
            Box::new(Lines::new(tone, LINE_SPACING, horizontal, count))
        }
        PatternKind::Box => {
            let tone = Tone::new(base - rng.uniform(base * 0.3, base * 0.7));
            Box::new(BoxOutline::new(tone))
        }
        PatternKind::BoxFill => Box::new(BoxFill::new(style.fill)),
        PatternKind::BoxFillB => Box::new(BoxFillB::new(style.fill)),
        PatternKind::Grid => Box::new(Grid::new(Tone::BLACK, style.fill, LINE_SPACING)),
        PatternKind::AngledLineA => Box::new(AngledLineA::new(style.border, style.spacing)),
        PatternKind::AngledLineB => Box::new(AngledLineB::new(
            style.border,
            style.spacing,
            ANGLED_STEP_HEIGHT,
        )),
        PatternKind::AngledLineC => Box::new(AngledLineC::new(style.border, style.spacing)),
    }
}

/// Darker or lighter variant of `base` by a random share of the headroom
///
/// Darker moves towards black by `[lo, hi)` of `base`; lighter moves towards
/// white by the same share of `1 - base`.
pub(crate) fn shifted_tone(base: Tone, darker: bool, lo: f64, hi: f64, rng: &mut dyn RngCore) -> Tone {
    let b = base.value();
    if darker {
        base.offset(-rng.uniform(b * lo, b * hi))
    } else {
        let room = 1.0 - b;
        base.offset(rng.uniform(room * lo, room * hi))
    }
}
