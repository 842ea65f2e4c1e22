//! Angled accents
//!
//! Thin strokes in the border tone that cross the panel: diagonal hatches,
//! a stepped rail and a bent conduit. All three start beyond the drawable
//! area by twice the cell spacing, so the clip trims their ends at the
//! rounded edge rather than leaving visible caps.

use greeble_core::{RngExt, Tone};
use greeble_paint::{
    polar_offset, LineCap, LineJoin, LineStyle, PaintError, Point, Surface,
};
use rand::RngCore;

use super::{layer, Pattern, ANGLED_MIN_SIZE, ANGLED_STEP_MIN_SIZE};

const HATCH_COUNT: usize = 3;
const HATCH_GAP: f32 = 10.0;
const HATCH_WIDTH: f32 = 2.0;
const ACCENT_WIDTH: f32 = 3.0;

/// Floor to whole pixels, absorbing trig error at multiples of 90°
fn snap(v: f32) -> f32 {
    (v + 1e-3).floor()
}

/// `origin` plus a random 2..=6 tenths of `extent`, floored
fn tenths(origin: i32, extent: i32, rng: &mut dyn RngCore) -> f32 {
    (f64::from(origin) + f64::from(rng.randint(2, 6)) * f64::from(extent) / 10.0).floor() as f32
}

fn accent_style(width: f32) -> LineStyle {
    LineStyle::new(width)
        .with_cap(LineCap::Round)
        .with_join(LineJoin::Miter)
}

/// Three parallel diagonals
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngledLineA {
    pub tone: Tone,
    pub spacing: i32,
}

impl AngledLineA {
    pub fn new(tone: Tone, spacing: i32) -> Self {
        Self { tone, spacing }
    }

    /// Hatch segments as (start, end) pairs
    fn segments(&self, width: i32, height: i32, rng: &mut dyn RngCore) -> Vec<(Point, Point)> {
        let pad = self.spacing * 2;
        let (x0, y0) = (-pad, -pad);
        let (x1, y1) = (width + pad, height + pad);
        let (w, h) = (x1 - x0, y1 - y0);

        // The far end is drawn before the near one
        let (start, end, dx, dy) = if w >= h {
            let end_x = tenths(x0, w, rng);
            let start_x = tenths(x0, w, rng);
            (
                Point::new(start_x, y0 as f32),
                Point::new(end_x, y1 as f32),
                HATCH_GAP,
                0.0,
            )
        } else {
            let end_y = tenths(y0, h, rng);
            let start_y = tenths(y0, h, rng);
            (
                Point::new(x0 as f32, start_y),
                Point::new(x1 as f32, end_y),
                0.0,
                HATCH_GAP,
            )
        };

        (0..HATCH_COUNT)
            .map(|i| {
                let k = i as f32;
                (
                    Point::new(start.x + dx * k, start.y + dy * k),
                    Point::new(end.x + dx * k, end.y + dy * k),
                )
            })
            .collect()
    }
}

impl Pattern for AngledLineA {
    fn min_size(&self) -> i32 {
        ANGLED_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let style = accent_style(HATCH_WIDTH);
        let mut surface = layer(width, height)?;
        for (a, b) in self.segments(width, height, rng) {
            surface.stroke_line(a.x, a.y, b.x, b.y, &style, self.tone);
        }
        Ok(Some(surface))
    }
}

/// A rail that steps down (or up) by `step` across the middle of the panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngledLineB {
    pub tone: Tone,
    pub spacing: i32,
    pub step: f32,
}

impl AngledLineB {
    pub fn new(tone: Tone, spacing: i32, step: f32) -> Self {
        Self {
            tone,
            spacing,
            step,
        }
    }

    /// The six vertices of the rail
    fn points(&self, width: i32, height: i32, rng: &mut dyn RngCore) -> [Point; 6] {
        let (w, pad) = (width as f32, (self.spacing * 2) as f32);
        let mut upper = (f64::from(rng.randint(3, 5)) * f64::from(height) / 8.0).floor() as f32;
        let mut lower = upper + self.step;

        let shoulder = w * 3.0 / 12.0;
        let x1 = shoulder;
        let mut x2 = x1 + self.step;
        let x4 = w - shoulder;
        let mut x3 = x4 - self.step;
        if x2 > x3 {
            std::mem::swap(&mut x2, &mut x3);
        }

        if rng.chance(0.5) {
            std::mem::swap(&mut upper, &mut lower);
        }

        [
            Point::new(-pad, upper),
            Point::new(x1, upper),
            Point::new(x2, lower),
            Point::new(x3, lower),
            Point::new(x4, upper),
            Point::new(w + pad, upper),
        ]
    }
}

impl Pattern for AngledLineB {
    fn min_size(&self) -> i32 {
        ANGLED_STEP_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let points = self.points(width, height, rng);
        let mut surface = layer(width, height)?;
        surface.stroke_polyline(&points, &accent_style(ACCENT_WIDTH), self.tone);
        Ok(Some(surface))
    }
}

/// A conduit entering from one side and bending 45° twice towards the far half
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngledLineC {
    pub tone: Tone,
    pub spacing: i32,
}

impl AngledLineC {
    pub fn new(tone: Tone, spacing: i32) -> Self {
        Self { tone, spacing }
    }

    /// Polyline vertices, each snapped down to whole pixels
    fn points(&self, width: i32, height: i32, rng: &mut dyn RngCore) -> Vec<Point> {
        let pad = self.spacing * 2;
        let y = (f64::from(rng.randint(2, 6)) * f64::from(height) / 10.0).floor() as f32;
        let (x, heading) = if rng.unit() > 0.5 {
            ((width + pad) as f32, 180.0)
        } else {
            (-pad as f32, 0.0)
        };

        // Bend towards whichever half has more room
        let upper_half = y <= height as f32 / 2.0;
        let turn: f32 = match (upper_half, heading == 0.0) {
            (true, true) | (false, false) => 45.0,
            _ => -45.0,
        };

        let run = (f64::from(rng.randint(3, 5)) * f64::from(width) / 10.0).floor() as f32;
        let bend = (width.min(height) / 4) as f32;
        let legs = [(run, heading), (bend, turn), (height as f32, turn)];

        let mut points = Vec::with_capacity(legs.len() + 1);
        let mut cursor = Point::new(x, y);
        let mut angle = 0.0;
        points.push(cursor);
        for (distance, delta) in legs {
            angle += delta;
            let next = polar_offset(cursor, distance, angle);
            cursor = Point::new(snap(next.x), snap(next.y));
            points.push(cursor);
        }
        points
    }
}

impl Pattern for AngledLineC {
    fn min_size(&self) -> i32 {
        ANGLED_STEP_MIN_SIZE
    }

    fn draw(
        &self,
        width: i32,
        height: i32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Surface>, PaintError> {
        let points = self.points(width, height, rng);
        let mut surface = layer(width, height)?;
        surface.stroke_polyline(&points, &accent_style(ACCENT_WIDTH), self.tone);
        Ok(Some(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeble_core::rng::seeded;

    #[test]
    fn test_hatches_are_parallel() {
        let mut rng = seeded(4);
        let a = AngledLineA::new(Tone::new(0.25), 2);
        let segments = a.segments(120, 60, &mut rng);
        assert_eq!(segments.len(), 3);

        // Wide cells hatch along x, offset by the gap
        let (s0, e0) = segments[0];
        let (s2, e2) = segments[2];
        assert_eq!(s0.y, -4.0);
        assert_eq!(e0.y, 64.0);
        assert_eq!(s2.x - s0.x, 20.0);
        assert_eq!(e2.x - e0.x, 20.0);
    }

    #[test]
    fn test_rail_shape() {
        for seed in 0..10 {
            let mut rng = seeded(seed);
            let b = AngledLineB::new(Tone::new(0.25), 2, 12.0);
            let p = b.points(96, 80, &mut rng);

            assert_eq!(p[0].x, -4.0);
            assert_eq!(p[5].x, 100.0);
            assert_eq!(p[0].y, p[1].y);
            assert_eq!(p[2].y, p[3].y);
            assert_eq!(p[4].y, p[5].y);
            assert_eq!((p[2].y - p[1].y).abs(), 12.0);
            assert!(p.windows(2).all(|w| w[0].x <= w[1].x));
        }
    }

    #[test]
    fn test_conduit_heads_into_far_half() {
        for seed in 0..20 {
            let mut rng = seeded(seed);
            let c = AngledLineC::new(Tone::new(0.25), 2);
            let p = c.points(100, 100, &mut rng);
            assert_eq!(p.len(), 4);

            let start = p[0];
            assert!(start.x == -4.0 || start.x == 104.0);
            // The first leg is horizontal
            assert_eq!(p[1].y, start.y);

            let last = p[3];
            if start.y <= 50.0 {
                assert!(last.y > start.y);
            } else {
                assert!(last.y < start.y);
            }
        }
    }

    #[test]
    fn test_accents_draw_something() {
        let mut rng = seeded(6);
        let patterns: [Box<dyn Pattern>; 3] = [
            Box::new(AngledLineA::new(Tone::new(0.25), 2)),
            Box::new(AngledLineB::new(Tone::new(0.25), 2, 12.0)),
            Box::new(AngledLineC::new(Tone::new(0.25), 2)),
        ];
        for pattern in patterns {
            let surface = pattern.draw(128, 96, &mut rng).unwrap().unwrap();
            assert!(surface.to_rgba8().chunks(4).any(|px| px[3] > 0));
        }
    }
}
