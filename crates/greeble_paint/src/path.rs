//! Path building
//!
//! A fluent wrapper around `tiny_skia::PathBuilder` for the open polylines
//! and outlines drawn by pattern code.

use tiny_skia::Path;

use crate::primitives::Point;

/// Point reached by walking `distance` from `from` at `degrees`
///
/// Angles follow screen coordinates: 0° points right, 90° points down.
pub fn polar_offset(from: Point, distance: f32, degrees: f32) -> Point {
    let theta = degrees.to_radians();
    Point::new(
        from.x + distance * theta.cos(),
        from.y + distance * theta.sin(),
    )
}

/// Builder for constructing paths with fluent API
pub struct PathBuilder {
    inner: tiny_skia::PathBuilder,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            inner: tiny_skia::PathBuilder::new(),
        }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.inner.move_to(x, y);
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.inner.line_to(x, y);
        self
    }

    /// Line to every point in turn
    pub fn polyline_to(self, points: impl IntoIterator<Item = Point>) -> Self {
        points.into_iter().fold(self, |pb, p| pb.line_to(p.x, p.y))
    }

    /// Open polyline through `points`; the first point starts the path
    pub fn polyline(points: &[Point]) -> Self {
        match points.split_first() {
            Some((first, rest)) => Self::new()
                .move_to(first.x, first.y)
                .polyline_to(rest.iter().copied()),
            None => Self::new(),
        }
    }

    pub fn close(mut self) -> Self {
        self.inner.close();
        self
    }

    /// Finish the path, None when it has no drawable segment
    pub fn build(self) -> Option<Path> {
        self.inner.finish()
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_polar_offset() {
        let o = Point::new(10.0, 10.0);
        assert!(close_to(polar_offset(o, 5.0, 0.0), Point::new(15.0, 10.0)));
        assert!(close_to(polar_offset(o, 5.0, 90.0), Point::new(10.0, 15.0)));
        assert!(close_to(polar_offset(o, 5.0, 180.0), Point::new(5.0, 10.0)));
        assert!(close_to(polar_offset(o, 4.0, -90.0), Point::new(10.0, 6.0)));
    }

    #[test]
    fn test_polyline() {
        let points = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 9.0)];
        let path = PathBuilder::polyline(&points).build().unwrap();
        assert_eq!(path.bounds().width(), 4.0);
        assert_eq!(path.bounds().height(), 9.0);
        assert_eq!(path.points().last(), Some(&tiny_skia::Point::from_xy(4.0, 9.0)));

        assert!(PathBuilder::polyline(&[]).build().is_none());
    }
}
