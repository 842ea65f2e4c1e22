//! Generation parameters
//!
//! Everything one `generate` call needs besides the canvas: subdivision
//! bounds, spacing and rounding, rivets, tones, the seed and which patterns
//! to draw. Parameters are immutable for the duration of a run and are
//! checked by [`GenerationParams::validate`] before any work starts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tone::Tone;

/// Deepest recursion the partitioner accepts
pub const MAX_DEPTH: u32 = 64;

/// Default cap on the worst case leaf count
pub const DEFAULT_MAX_CELLS: u64 = 262_144;

// ─────────────────────────────────────────────────────────────────────────────
// Pattern kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Decorative micro-pattern drawn inside a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// Bundle of parallel strokes
    Lines,
    /// Single outlined rectangle
    Box,
    /// Mosaic of filled sub-rectangles
    BoxFill,
    /// Sparse two-level mosaic
    BoxFillB,
    /// Horizontal rules with vertical dividers
    Grid,
    /// Three parallel diagonals
    AngledLineA,
    /// Stepped line with two slants
    AngledLineB,
    /// Polyline bent twice by 45 degrees
    AngledLineC,
}

impl PatternKind {
    /// Every pattern, in weight-table order
    pub const ALL: [PatternKind; 8] = [
        PatternKind::Lines,
        PatternKind::Box,
        PatternKind::BoxFill,
        PatternKind::BoxFillB,
        PatternKind::Grid,
        PatternKind::AngledLineA,
        PatternKind::AngledLineB,
        PatternKind::AngledLineC,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PatternKind::Lines => "lines",
            PatternKind::Box => "box",
            PatternKind::BoxFill => "box-fill",
            PatternKind::BoxFillB => "box-fill-b",
            PatternKind::Grid => "grid",
            PatternKind::AngledLineA => "angled-line-a",
            PatternKind::AngledLineB => "angled-line-b",
            PatternKind::AngledLineC => "angled-line-c",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        PatternKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownName {
                kind: "pattern",
                name: s.to_string(),
            })
    }
}

/// Which patterns a run draws
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DrawType {
    /// Weighted random pattern per cell
    #[default]
    All,
    /// Base fills only, no patterns
    RectOnly,
    /// The same pattern in every cell
    Single(PatternKind),
}

impl fmt::Display for DrawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawType::All => f.write_str("all"),
            DrawType::RectOnly => f.write_str("rect-only"),
            DrawType::Single(kind) => kind.fmt(f),
        }
    }
}

impl FromStr for DrawType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "all" => Ok(DrawType::All),
            "rect-only" => Ok(DrawType::RectOnly),
            _ => s.parse().map(DrawType::Single).map_err(|_| ConfigError::UnknownName {
                kind: "draw type",
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for DrawType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DrawType> for String {
    fn from(value: DrawType) -> Self {
        value.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fill and rivets
// ─────────────────────────────────────────────────────────────────────────────

/// Base tone of each cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillTone {
    /// Fresh tone per cell in a band above the default border tone
    #[default]
    Random,
    /// The same tone for every cell
    Fixed(Tone),
}

/// Corner decoration style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RivetKind {
    /// Small dark bar
    #[default]
    Box,
    /// Radially shaded bump
    Circle,
}

impl fmt::Display for RivetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RivetKind::Box => f.write_str("box"),
            RivetKind::Circle => f.write_str("circle"),
        }
    }
}

impl FromStr for RivetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(RivetKind::Box),
            "circle" => Ok(RivetKind::Circle),
            _ => Err(ConfigError::UnknownName {
                kind: "rivet kind",
                name: s.to_string(),
            }),
        }
    }
}

/// Rivet settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RivetParams {
    pub enabled: bool,
    pub kind: RivetKind,
    /// Distance of the rivet centre from the cell edges
    pub spacing: i32,
    /// Rivet diameter (circle) or bar height (box)
    pub size: i32,
    /// Bump height on the 0..=255 scale (circle only)
    pub height: u8,
    /// Draw a socket shadow under circle rivets
    pub background: bool,
}

impl Default for RivetParams {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: RivetKind::Box,
            spacing: 8,
            size: 9,
            height: 12,
            background: false,
        }
    }
}

impl RivetParams {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Complete parameter set for one generation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Fewest pieces a node is split into
    pub dmin: u32,
    /// Most pieces a node is split into (the root always uses this)
    pub dmax: u32,
    /// Recursion depth at which cut rectangles become leaves
    pub depth: u32,
    /// Gap between neighbouring cells, applied on every side of a cell
    pub spacing: i32,
    /// Corner rounding of each cell
    pub corner_radius: i32,
    pub fill: FillTone,
    /// Background showing through the gaps
    pub border_tone: Tone,
    pub seed: u64,
    pub draw_type: DrawType,
    /// Upper bound on the worst case number of leaf cells
    pub max_cells: u64,
    pub rivet: RivetParams,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            dmin: 1,
            dmax: 3,
            depth: 4,
            spacing: 2,
            corner_radius: 2,
            rivet: RivetParams::default(),
            fill: FillTone::Random,
            border_tone: Tone::from_byte(64),
            seed: 42,
            draw_type: DrawType::All,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl GenerationParams {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_splits(mut self, dmin: u32, dmax: u32, depth: u32) -> Self {
        self.dmin = dmin;
        self.dmax = dmax;
        self.depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_draw_type(mut self, draw_type: DrawType) -> Self {
        self.draw_type = draw_type;
        self
    }

    pub fn with_fill(mut self, fill: FillTone) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_rivets(mut self, rivet: RivetParams) -> Self {
        self.rivet = rivet;
        self
    }

    /// Upper split count after normalization (`dmax` never below `dmin`)
    pub fn effective_dmax(&self) -> u32 {
        self.dmax.max(self.dmin)
    }

    /// Most leaves the partitioner can produce: `dmax^(depth + 1)`
    pub fn worst_case_cells(&self) -> u64 {
        let base = u64::from(self.effective_dmax());
        (0..=self.depth).fold(1u64, |acc, _| acc.saturating_mul(base))
    }

    /// Reject parameters that cannot produce a texture
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.dmin == 0 || self.dmax == 0 {
            return Err(ConfigError::ZeroSplits {
                dmin: self.dmin,
                dmax: self.dmax,
            });
        }
        if self.depth > MAX_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.depth,
                max: MAX_DEPTH,
            });
        }
        if self.spacing < 0 {
            return Err(ConfigError::NegativeSpacing(self.spacing));
        }
        if self.corner_radius < 0 {
            return Err(ConfigError::NegativeRadius(self.corner_radius));
        }
        if self.rivet.enabled {
            if self.rivet.size <= 0 {
                return Err(ConfigError::InvalidRivet(format!(
                    "size {} must be > 0",
                    self.rivet.size
                )));
            }
            if self.rivet.spacing < 0 {
                return Err(ConfigError::InvalidRivet(format!(
                    "spacing {} must be >= 0",
                    self.rivet.spacing
                )));
            }
        }

        let estimate = self.worst_case_cells();
        if estimate > self.max_cells {
            return Err(ConfigError::TooManyCells {
                estimate,
                limit: self.max_cells,
            });
        }

        Ok(())
    }
}
