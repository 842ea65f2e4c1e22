//! Random boxes
//!
//! A simpler companion generator: scatter boxes of random tone and size over
//! a transparent canvas, filled or outlined. Useful as a noise layer under
//! or over a panel texture. Drawing is aliased so box edges stay crisp.

use greeble_core::{rng, ConfigError, RngExt, Tone};
use greeble_paint::{Canvas, LineCap, LineJoin, LineStyle, Surface};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Parameters for [`render_boxes`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxesParams {
    /// Number of boxes to draw
    pub count: u32,
    /// Fill boxes; outline them otherwise
    pub fill: bool,
    /// Outline width when not filling
    pub line_width: f32,
    pub wmin: i32,
    pub wmax: i32,
    pub hmin: i32,
    pub hmax: i32,
    pub seed: u64,
}

impl Default for BoxesParams {
    fn default() -> Self {
        Self {
            count: 512,
            fill: true,
            line_width: 1.0,
            wmin: 16,
            wmax: 64,
            hmin: 16,
            hmax: 128,
            seed: 42,
        }
    }
}

impl BoxesParams {
    /// Size ranges with each maximum raised to at least its minimum
    pub fn normalized(&self) -> Self {
        Self {
            wmax: self.wmax.max(self.wmin),
            hmax: self.hmax.max(self.hmin),
            ..self.clone()
        }
    }
}

/// Draw `params.count` random boxes on a transparent `width` x `height` canvas
pub fn render_boxes(width: u32, height: u32, params: &BoxesParams) -> Result<Canvas> {
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyCanvas { width, height }.into());
    }

    let params = params.normalized();
    let mut canvas = Surface::new(width, height)?;
    canvas.set_anti_alias(false);

    let style = LineStyle::new(params.line_width)
        .with_cap(LineCap::Square)
        .with_join(LineJoin::Miter);
    let (cw, ch) = (
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    );

    let mut rng = rng::seeded(params.seed);
    for _ in 0..params.count {
        let tone = Tone::new(rng.uniform(0.0, 1.0));
        let w = rng.randint(params.wmin, params.wmax);
        let h = rng.randint(params.hmin, params.hmax);
        let x = rng.randint(-w, cw - 1);
        let y = rng.randint(-h, ch - 1);

        if params.fill {
            canvas.fill_rect_xywh(x as f32, y as f32, w as f32, h as f32, tone);
        } else {
            canvas.stroke_rect_xywh(x as f32, y as f32, w as f32, h as f32, &style, tone);
        }
    }

    tracing::debug!(
        "Drew {} {} boxes on {}x{} (seed {})",
        params.count,
        if params.fill { "filled" } else { "outlined" },
        width,
        height,
        params.seed
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;

    #[test]
    fn test_zero_canvas_rejected() {
        assert!(matches!(
            render_boxes(0, 10, &BoxesParams::default()),
            Err(GenerateError::InvalidConfig(ConfigError::EmptyCanvas { .. }))
        ));
    }

    #[test]
    fn test_no_boxes_is_transparent() {
        let params = BoxesParams {
            count: 0,
            ..BoxesParams::default()
        };
        let canvas = render_boxes(32, 32, &params).unwrap();
        assert!(canvas.to_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_filled_boxes_are_aliased() {
        let canvas = render_boxes(128, 128, &BoxesParams::default()).unwrap();
        let rgba = canvas.to_rgba8();
        assert!(rgba.chunks(4).all(|px| px[3] == 0 || px[3] == 255));
        assert!(rgba.chunks(4).any(|px| px[3] == 255));
    }

    #[test]
    fn test_outlines_and_determinism() {
        let params = BoxesParams {
            count: 40,
            fill: false,
            line_width: 2.0,
            seed: 7,
            ..BoxesParams::default()
        };
        let a = render_boxes(100, 80, &params).unwrap();
        let b = render_boxes(100, 80, &params).unwrap();
        assert_eq!(a, b);

        let filled = render_boxes(
            100,
            80,
            &BoxesParams {
                fill: true,
                ..params.clone()
            },
        )
        .unwrap();
        assert_ne!(a, filled);
    }

    #[test]
    fn test_inverted_ranges_normalize() {
        let params = BoxesParams {
            wmin: 30,
            wmax: 10,
            hmin: 8,
            hmax: 4,
            ..BoxesParams::default()
        }
        .normalized();
        assert_eq!((params.wmin, params.wmax), (30, 30));
        assert_eq!((params.hmin, params.hmax), (8, 8));
    }
}
