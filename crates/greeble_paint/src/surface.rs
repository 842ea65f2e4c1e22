//! Raster surfaces
//!
//! [`Surface`] wraps a `tiny_skia::Pixmap` and exposes a Canvas-like API in
//! tones instead of colors. Storage is premultiplied RGBA8 with R = G = B;
//! use [`Surface::to_gray8`] or [`Surface::to_rgba8`] for straight-alpha
//! data.

use greeble_core::Tone;
use tiny_skia::{
    Color, FillRule, Mask, Paint, Path, Pixmap, PixmapPaint, PremultipliedColorU8, Rect,
    Transform,
};

use crate::error::PaintError;
use crate::export;
use crate::path::PathBuilder;
use crate::primitives::{Circle, LineStyle, Point, RoundedRect};

/// The final texture is an ordinary surface owned by the caller
pub type Canvas = Surface;

/// Alpha-capable grayscale raster
#[derive(Clone, Debug)]
pub struct Surface {
    pixmap: Pixmap,
    anti_alias: bool,
}

impl Surface {
    /// Create a fully transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self, PaintError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(PaintError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            anti_alias: true,
        })
    }

    /// Toggle anti-aliasing for subsequent draws (on by default)
    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        self.anti_alias = anti_alias;
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Underlying pixmap (premultiplied RGBA8)
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn paint(&self, tone: Tone) -> Paint<'static> {
        let v = tone.value() as f32;
        let mut paint = Paint::default();
        paint.set_color(Color::from_rgba(v, v, v, 1.0).unwrap_or(Color::BLACK));
        paint.anti_alias = self.anti_alias;
        paint
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Fills
    // ═══════════════════════════════════════════════════════════════════════════

    /// Replace every pixel with an opaque tone
    pub fn clear(&mut self, tone: Tone) {
        let v = tone.value() as f32;
        self.pixmap
            .fill(Color::from_rgba(v, v, v, 1.0).unwrap_or(Color::BLACK));
    }

    /// Fill a rectangle at (x, y) with width/height
    pub fn fill_rect_xywh(&mut self, x: f32, y: f32, width: f32, height: f32, tone: Tone) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        let paint = self.paint(tone);
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Fill a rounded rectangle
    pub fn fill_rounded_rect(&mut self, rect: &RoundedRect, tone: Tone) {
        if let Some(path) = rect.to_path() {
            self.fill_path(&path, tone);
        }
    }

    /// Fill a circle at (cx, cy) with radius
    pub fn fill_circle_xyr(&mut self, cx: f32, cy: f32, radius: f32, tone: Tone) {
        if let Some(path) = Circle::new(Point::new(cx, cy), radius).to_path() {
            self.fill_path(&path, tone);
        }
    }

    pub fn fill_path(&mut self, path: &Path, tone: Tone) {
        let paint = self.paint(tone);
        self.pixmap.fill_path(
            path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Strokes
    // ═══════════════════════════════════════════════════════════════════════════

    /// Stroke a single segment
    pub fn stroke_line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        style: &LineStyle,
        tone: Tone,
    ) {
        if let Some(path) = PathBuilder::new().move_to(x0, y0).line_to(x1, y1).build() {
            self.stroke_path(&path, style, tone);
        }
    }

    /// Stroke an open polyline
    pub fn stroke_polyline(&mut self, points: &[Point], style: &LineStyle, tone: Tone) {
        if let Some(path) = PathBuilder::polyline(points).build() {
            self.stroke_path(&path, style, tone);
        }
    }

    /// Stroke a rectangle outline at (x, y) with width/height
    pub fn stroke_rect_xywh(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: &LineStyle,
        tone: Tone,
    ) {
        let path = PathBuilder::new()
            .move_to(x, y)
            .line_to(x + width, y)
            .line_to(x + width, y + height)
            .line_to(x, y + height)
            .close()
            .build();
        if let Some(path) = path {
            self.stroke_path(&path, style, tone);
        }
    }

    pub fn stroke_path(&mut self, path: &Path, style: &LineStyle, tone: Tone) {
        if style.width <= 0.0 {
            return;
        }
        let paint = self.paint(tone);
        self.pixmap.stroke_path(
            path,
            &paint,
            &style.to_stroke(),
            Transform::identity(),
            None,
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Compositing
    // ═══════════════════════════════════════════════════════════════════════════

    /// Paint `layer` with its top-left corner at (x, y), clipped to `clip`
    ///
    /// The layer is blended source-over through a mask built from the
    /// rounded rect, so nothing lands outside the clip even though the
    /// layer itself is an unclipped rectangle. An empty clip draws nothing.
    pub fn composite(
        &mut self,
        layer: &Surface,
        x: i32,
        y: i32,
        clip: &RoundedRect,
    ) -> Result<(), PaintError> {
        let Some(path) = clip.to_path() else {
            tracing::trace!("Empty clip {:?}, layer not painted", clip);
            return Ok(());
        };

        let mut mask = Mask::new(self.width(), self.height()).ok_or_else(|| {
            PaintError::Mask(format!(
                "cannot allocate {}x{} mask",
                self.width(),
                self.height()
            ))
        })?;
        mask.fill_path(&path, FillRule::Winding, self.anti_alias, Transform::identity());

        self.pixmap.draw_pixmap(
            x,
            y,
            layer.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            Some(&mask),
        );
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Readback
    // ═══════════════════════════════════════════════════════════════════════════

    /// Pixel at `(x, y)`, None outside the surface
    fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y)
    }

    /// Straight (unpremultiplied) tone of a pixel; transparent pixels read black
    pub fn tone_at(&self, x: u32, y: u32) -> Option<Tone> {
        let px = self.pixel(x, y)?;
        let straight = px.demultiply();
        Some(Tone::new(f64::from(straight.red()) / 255.0))
    }

    /// Coverage of a pixel in `[0, 1]`
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<f32> {
        let px = self.pixel(x, y)?;
        Some(f32::from(px.alpha()) / 255.0)
    }

    /// Raw 8-bit level of a pixel, unpremultiplied
    pub fn level_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|px| px.demultiply().red())
    }

    /// One byte per pixel, straight tone, row-major
    pub fn to_gray8(&self) -> Vec<u8> {
        export::gray_from_premultiplied(self.pixmap.data())
    }

    /// Four bytes per pixel, straight alpha RGBA, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        export::unpremultiply_alpha(self.pixmap.data())
    }
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.pixmap.data() == other.pixmap.data()
    }
}
