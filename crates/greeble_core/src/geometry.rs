//! Integer cell geometry
//!
//! Cells are produced by the partitioner in whole pixels and stay integer
//! through the inset step, so every pattern works in a cell-local frame whose
//! origin is the top-left corner of the drawable area.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Cell rectangles
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle with integer corners `(x0, y0)`..`(x1, y1)`
///
/// The far corner is exclusive when rasterized: a cell `(0, 0, 10, 10)`
/// covers pixels `0..10` on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl CellRect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Covered area in square pixels, zero for degenerate rects
    pub fn area(&self) -> i64 {
        if self.is_degenerate() {
            0
        } else {
            i64::from(self.width()) * i64::from(self.height())
        }
    }

    /// True when either side is zero or negative
    pub const fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Area shared with another rect, zero when they only touch
    pub fn overlap(&self, other: &CellRect) -> i64 {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        CellRect::new(x0, y0, x1, y1).area()
    }

    /// Shrink by `spacing` on every side, producing the drawable area
    ///
    /// The result may be empty or inverted for small cells.
    pub const fn inset(&self, spacing: i32) -> Area {
        Area::new(
            self.x0 + spacing,
            self.y0 + spacing,
            self.x1 - spacing,
            self.y1 - spacing,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drawable areas
// ─────────────────────────────────────────────────────────────────────────────

/// Working rectangle of one cell after the spacing inset
///
/// Corners are kept in canvas coordinates so the compositor knows where to
/// paint; renderers only look at [`Area::width`] and [`Area::height`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Area {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Area {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// True when there is nothing to draw into
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Shrink by `amount` on every side
    pub const fn inset(&self, amount: i32) -> Self {
        Self::new(
            self.x0 + amount,
            self.y0 + amount,
            self.x1 - amount,
            self.y1 - amount,
        )
    }

    /// Convert back into a cell rect with the same corners
    pub const fn to_rect(self) -> CellRect {
        CellRect::new(self.x0, self.y0, self.x1, self.y1)
    }
}

impl From<CellRect> for Area {
    fn from(rect: CellRect) -> Self {
        Area::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}
