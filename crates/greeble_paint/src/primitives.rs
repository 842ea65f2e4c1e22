//! Geometric primitives
//!
//! Float geometry handed to tiny-skia. Cells arrive as integer areas from the
//! partitioner and are converted here.

use greeble_core::Area;
use tiny_skia::{LineCap, LineJoin, Path, PathBuilder as SkiaPathBuilder};

/// Cubic Bézier handle length for a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A circle
#[derive(Clone, Copy, Debug, Default)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    /// None for non-positive radii
    pub fn to_path(&self) -> Option<Path> {
        if self.radius <= 0.0 {
            return None;
        }
        SkiaPathBuilder::from_circle(self.center.x, self.center.y, self.radius)
    }
}

/// A rounded rectangle given by its corners
///
/// The radius is clamped on construction: when `2·radius` exceeds the
/// smaller side it drops to `floor(min(w, h) / 2)`, and a radius of zero
/// yields a plain rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundedRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    radius: f32,
}

impl RoundedRect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, radius: f32) -> Self {
        let w = x1 - x0;
        let h = y1 - y0;
        let radius = if radius * 2.0 > w || radius * 2.0 > h {
            (w.min(h) / 2.0).floor()
        } else {
            radius
        };
        Self {
            x0,
            y0,
            x1,
            y1,
            radius: radius.max(0.0),
        }
    }

    /// Rounded rect covering a drawable area in canvas coordinates
    pub fn from_area(area: &Area, radius: i32) -> Self {
        Self::new(
            area.x0 as f32,
            area.y0 as f32,
            area.x1 as f32,
            area.y1 as f32,
            radius as f32,
        )
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Radius after clamping
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Build the outline path, None when the rect is empty
    pub fn to_path(&self) -> Option<Path> {
        let (x, y, w, h) = (self.x0, self.y0, self.width(), self.height());
        if w <= 0.0 || h <= 0.0 {
            return None;
        }

        let r = self.radius;
        if r <= 0.0 {
            let rect = tiny_skia::Rect::from_xywh(x, y, w, h)?;
            return Some(SkiaPathBuilder::from_rect(rect));
        }

        let c = r * (1.0 - KAPPA);
        let mut pb = SkiaPathBuilder::new();
        pb.move_to(x + r, y);

        // Top edge, top-right corner
        pb.line_to(x + w - r, y);
        pb.cubic_to(x + w - c, y, x + w, y + c, x + w, y + r);

        // Right edge, bottom-right corner
        pb.line_to(x + w, y + h - r);
        pb.cubic_to(x + w, y + h - c, x + w - c, y + h, x + w - r, y + h);

        // Bottom edge, bottom-left corner
        pb.line_to(x + r, y + h);
        pb.cubic_to(x + c, y + h, x, y + h - c, x, y + h - r);

        // Left edge, top-left corner
        pb.line_to(x, y + r);
        pb.cubic_to(x, y + c, x + c, y, x + r, y);

        pb.close();
        pb.finish()
    }
}

/// Stroke settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Round,
            join: LineJoin::Miter,
        }
    }
}

impl LineStyle {
    /// Round caps, miter joins
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub(crate) fn to_stroke(self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.width,
            line_cap: self.cap,
            line_join: self.join,
            ..tiny_skia::Stroke::default()
        }
    }
}
