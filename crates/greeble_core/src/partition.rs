//! Recursive jittered partitioning
//!
//! A rectangle is cut into `d` slices along one axis, each interior cut
//! nudged by a random offset, and every slice is cut again until the
//! configured depth is reached. The leaves tile the input exactly; jitter
//! only moves boundaries, it never opens gaps.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::CellRect;
use crate::params::GenerationParams;
use crate::rng::RngExt;

/// Share of a slice width used as the cut perturbation bound
pub const JITTER_FRACTION: f64 = 0.6;

/// Which direction a node is cut in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    /// Cut along x: slices sit side by side
    Columns,
    /// Cut along y: slices are stacked top to bottom
    Rows,
    /// Rows when the rect is at least as tall as it is wide, columns otherwise
    #[default]
    Auto,
}

impl Axis {
    /// Resolve `Auto` for a concrete rect; true means cut along y
    fn cuts_rows(self, rect: &CellRect) -> bool {
        match self {
            Axis::Columns => false,
            Axis::Rows => true,
            Axis::Auto => rect.width() <= rect.height(),
        }
    }
}

/// Cut `rect` once into (up to) `d` slices
///
/// Cut positions sit at even spacing, each moved by a uniform offset within
/// `±jitter·step/2`, then floored, deduplicated and sorted. Collapsed cuts
/// yield fewer than `d` slices. Degenerate input gives an empty list and
/// consumes no randomness.
pub fn split<R: Rng + ?Sized>(
    rect: CellRect,
    d: u32,
    axis: Axis,
    jitter: f64,
    rng: &mut R,
) -> Vec<CellRect> {
    if rect.is_degenerate() {
        return Vec::new();
    }

    let rows = axis.cuts_rows(&rect);
    let (start, end) = if rows {
        (rect.y0, rect.y1)
    } else {
        (rect.x0, rect.x1)
    };

    let d = d.max(1);
    let step = f64::from(end - start) / f64::from(d);
    let shift = step * jitter / 2.0;

    let mut cuts = Vec::with_capacity(d as usize + 1);
    cuts.push(start);
    for i in 1..d {
        let pos = f64::from(start) + step * f64::from(i) + rng.uniform(-shift, shift);
        let cut = pos.floor() as i32;
        if cut >= start && cut <= end {
            cuts.push(cut);
        }
    }
    cuts.push(end);
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|pair| {
            if rows {
                CellRect::new(rect.x0, pair[0], rect.x1, pair[1])
            } else {
                CellRect::new(pair[0], rect.y0, pair[1], rect.y1)
            }
        })
        .collect()
}

/// Recursive partitioner producing the leaf cells of a canvas
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Partitioner {
    dmin: u32,
    dmax: u32,
    max_depth: u32,
}

impl Partitioner {
    /// `dmax` below `dmin` is raised to `dmin`
    pub fn new(dmin: u32, dmax: u32, max_depth: u32) -> Self {
        Self {
            dmin,
            dmax: dmax.max(dmin),
            max_depth,
        }
    }

    pub fn from_params(params: &GenerationParams) -> Self {
        Self::new(params.dmin, params.dmax, params.depth)
    }

    /// Split count for a node: fixed when the range is a single value, the
    /// maximum at the root, random in `dmin..=dmax` below it
    fn split_count<R: Rng + ?Sized>(&self, depth: u32, rng: &mut R) -> u32 {
        if self.dmin >= self.dmax {
            self.dmin
        } else if depth == 0 {
            self.dmax
        } else {
            rng.gen_range(self.dmin..=self.dmax)
        }
    }

    /// Leaves of the subtree rooted at `rect`
    ///
    /// At `depth == max_depth` the slices of this node are the leaves; above
    /// it every slice recurses with [`Axis::Auto`].
    pub fn subdivide<R: Rng + ?Sized>(
        &self,
        rect: CellRect,
        axis: Axis,
        depth: u32,
        rng: &mut R,
    ) -> Vec<CellRect> {
        let mut leaves = Vec::new();
        self.subdivide_into(&mut leaves, rect, axis, depth, rng);
        leaves
    }

    fn subdivide_into<R: Rng + ?Sized>(
        &self,
        leaves: &mut Vec<CellRect>,
        rect: CellRect,
        axis: Axis,
        depth: u32,
        rng: &mut R,
    ) {
        if depth > self.max_depth {
            return;
        }

        let d = self.split_count(depth, rng);
        let slices = split(rect, d, axis, JITTER_FRACTION, rng);

        if depth == self.max_depth {
            leaves.extend(slices);
        } else {
            for slice in slices {
                self.subdivide_into(leaves, slice, Axis::Auto, depth + 1, rng);
            }
        }
    }

    /// Partition a whole canvas
    ///
    /// The root rect spans `(0, 0)`..`(width - 1, height - 1)` and is cut
    /// into rows first.
    pub fn partition<R: Rng + ?Sized>(&self, width: u32, height: u32, rng: &mut R) -> Vec<CellRect> {
        let root = CellRect::new(
            0,
            0,
            clamp_extent(width).saturating_sub(1),
            clamp_extent(height).saturating_sub(1),
        );
        let cells = self.subdivide(root, Axis::Rows, 0, rng);

        tracing::debug!(
            "Partitioned {}x{} into {} cells (splits {}..={}, depth {})",
            width,
            height,
            cells.len(),
            self.dmin,
            self.dmax,
            self.max_depth
        );

        cells
    }
}

fn clamp_extent(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    fn assert_tiles(rect: CellRect, leaves: &[CellRect]) {
        let total: i64 = leaves.iter().map(CellRect::area).sum();
        assert_eq!(total, rect.area(), "leaf areas must sum to the input area");

        for (i, a) in leaves.iter().enumerate() {
            assert!(!a.is_degenerate());
            assert!(a.x0 >= rect.x0 && a.x1 <= rect.x1);
            assert!(a.y0 >= rect.y0 && a.y1 <= rect.y1);
            for b in &leaves[i + 1..] {
                assert_eq!(a.overlap(b), 0, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_split_tiles_input() {
        let mut rng = seeded(11);
        let rect = CellRect::new(3, 7, 203, 91);
        for d in 1..=8 {
            let slices = split(rect, d, Axis::Auto, JITTER_FRACTION, &mut rng);
            assert!(!slices.is_empty() && slices.len() <= d as usize);
            assert_tiles(rect, &slices);
        }
    }

    #[test]
    fn test_split_axis() {
        let mut rng = seeded(1);
        let wide = CellRect::new(0, 0, 100, 40);

        for slice in split(wide, 3, Axis::Auto, 0.0, &mut rng) {
            assert_eq!((slice.y0, slice.y1), (0, 40));
        }
        for slice in split(wide, 3, Axis::Rows, 0.0, &mut rng) {
            assert_eq!((slice.x0, slice.x1), (0, 100));
        }

        // Square rects are cut into rows
        for slice in split(CellRect::new(0, 0, 50, 50), 2, Axis::Auto, 0.0, &mut rng) {
            assert_eq!((slice.x0, slice.x1), (0, 50));
        }
    }

    #[test]
    fn test_split_without_jitter_is_even() {
        let mut rng = seeded(5);
        let slices = split(CellRect::new(0, 0, 120, 300), 4, Axis::Columns, 0.0, &mut rng);
        assert_eq!(
            slices,
            vec![
                CellRect::new(0, 0, 30, 300),
                CellRect::new(30, 0, 60, 300),
                CellRect::new(60, 0, 90, 300),
                CellRect::new(90, 0, 120, 300),
            ]
        );
    }

    #[test]
    fn test_split_collapsing_cuts() {
        // 3 pixels cannot hold 8 distinct slices
        let mut rng = seeded(9);
        let rect = CellRect::new(0, 0, 3, 3);
        let slices = split(rect, 8, Axis::Auto, JITTER_FRACTION, &mut rng);
        assert!(slices.len() <= 3);
        assert_tiles(rect, &slices);
    }

    #[test]
    fn test_degenerate_input() {
        let mut rng = seeded(2);
        assert!(split(CellRect::new(10, 10, 10, 50), 3, Axis::Auto, 0.6, &mut rng).is_empty());
        assert!(split(CellRect::new(10, 10, 50, 4), 3, Axis::Auto, 0.6, &mut rng).is_empty());

        let partitioner = Partitioner::new(2, 3, 3);
        assert!(partitioner
            .subdivide(CellRect::new(0, 0, 0, 0), Axis::Rows, 0, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_subdivide_tiles_at_every_depth() {
        let rect = CellRect::new(0, 0, 511, 511);
        for depth in 0..4 {
            let mut rng = seeded(100 + u64::from(depth));
            let leaves = Partitioner::new(1, 3, depth).subdivide(rect, Axis::Rows, 0, &mut rng);
            assert!(!leaves.is_empty());
            assert_tiles(rect, &leaves);
        }
    }

    #[test]
    fn test_terminal_depth_returns_slices() {
        let mut rng = seeded(4);
        let rect = CellRect::new(0, 0, 400, 200);
        let leaves = Partitioner::new(2, 2, 0).subdivide(rect, Axis::Columns, 0, &mut rng);
        assert_eq!(leaves.len(), 2);
        assert_tiles(rect, &leaves);

        // Nodes already past the limit contribute nothing
        let none = Partitioner::new(2, 2, 0).subdivide(rect, Axis::Columns, 1, &mut rng);
        assert!(none.is_empty());
    }

    #[test]
    fn test_single_split_gives_one_cell() {
        for depth in [0, 1, 4, 12] {
            let mut rng = seeded(7);
            let cells = Partitioner::new(1, 1, depth).partition(256, 256, &mut rng);
            assert_eq!(cells, vec![CellRect::new(0, 0, 255, 255)]);
        }
    }

    #[test]
    fn test_root_uses_dmax() {
        let mut rng = seeded(8);
        let cells = Partitioner::new(2, 2, 1).partition(256, 256, &mut rng);
        assert_eq!(cells.len(), 4);
        assert_tiles(CellRect::new(0, 0, 255, 255), &cells);

        // Root cuts rows: the first two leaves share the top band
        assert_eq!(cells[0].y0, 0);
        assert_eq!(cells[0].y1, cells[1].y1);
        assert_eq!(cells[0].x1, cells[1].x0);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let partitioner = Partitioner::new(1, 4, 3);
        let a = partitioner.partition(300, 200, &mut seeded(77));
        let b = partitioner.partition(300, 200, &mut seeded(77));
        let c = partitioner.partition(300, 200, &mut seeded(78));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
