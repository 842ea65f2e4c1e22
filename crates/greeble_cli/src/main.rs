//! Greeble CLI
//!
//! Generate sci-fi panel bump textures and random box layers from the
//! command line.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use greeble_core::rng::resolve_seed;
use greeble_core::Partitioner;
use greeble_texture::pattern::{self, PATTERN_WEIGHTS};
use greeble_texture::rivet::{RIVET_BOX_MIN_SIZE, RIVET_CIRCLE_MIN_SIZE};
use greeble_texture::{
    generate_with_stats, render_boxes, DrawType, FillTone, GenerationParams, RivetKind, Tone,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod export;

use config::{GreebleConfig, CONFIG_FILE};
use export::PixelLayout;

#[derive(Parser)]
#[command(name = "greeble")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sci-fi panel bump texture generator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Canvas size and seed overrides shared by every drawing command
#[derive(Args, Debug, Default)]
struct CanvasArgs {
    /// Config file (defaults to ./greeble.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Square canvas size, overrides width and height
    #[arg(long)]
    size: Option<u32>,

    /// Canvas width
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height
    #[arg(long)]
    height: Option<u32>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Derive the seed from the clock
    #[arg(long)]
    randomize: bool,
}

impl CanvasArgs {
    fn size(&self, width: u32, height: u32) -> (u32, u32) {
        match self.size {
            Some(size) => (size, size),
            None => (self.width.unwrap_or(width), self.height.unwrap_or(height)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a panel texture
    Generate {
        #[command(flatten)]
        canvas: CanvasArgs,

        /// Pattern selection: all, rect-only or a single pattern name
        #[arg(short, long)]
        draw_type: Option<DrawType>,

        /// Fewest pieces per split
        #[arg(long)]
        dmin: Option<u32>,

        /// Most pieces per split
        #[arg(long)]
        dmax: Option<u32>,

        /// Subdivision depth
        #[arg(long)]
        depth: Option<u32>,

        /// Gap between cells in pixels
        #[arg(long)]
        spacing: Option<i32>,

        /// Cell corner radius in pixels
        #[arg(long)]
        radius: Option<i32>,

        /// Fixed panel tone (0-255) instead of random tones
        #[arg(long)]
        fill: Option<u8>,

        /// Background tone (0-255)
        #[arg(long)]
        border: Option<u8>,

        /// Disable corner rivets
        #[arg(long)]
        no_rivets: bool,

        /// Rivet kind (box or circle)
        #[arg(long)]
        rivet_kind: Option<RivetKind>,

        /// Output image (.png or .bmp)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write RGBA instead of grayscale
        #[arg(long)]
        rgba: bool,

        /// Also write the resolved parameters to this TOML file
        #[arg(long)]
        dump_config: Option<PathBuf>,
    },

    /// Scatter random boxes over a transparent canvas
    Boxes {
        #[command(flatten)]
        canvas: CanvasArgs,

        /// Number of boxes
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Outline boxes instead of filling them
        #[arg(long)]
        outline: bool,

        /// Outline width
        #[arg(long)]
        line_width: Option<f32>,

        /// Minimum box width
        #[arg(long)]
        wmin: Option<i32>,

        /// Maximum box width
        #[arg(long)]
        wmax: Option<i32>,

        /// Minimum box height
        #[arg(long)]
        hmin: Option<i32>,

        /// Maximum box height
        #[arg(long)]
        hmax: Option<i32>,

        /// Output image (.png or .bmp)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the cell partition without drawing
    Cells {
        #[command(flatten)]
        canvas: CanvasArgs,

        /// Print JSON instead of one cell per line
        #[arg(long)]
        json: bool,
    },

    /// Write a default greeble.toml
    Init {
        /// Target file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show patterns, weights and size guards
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Generate {
            canvas,
            draw_type,
            dmin,
            dmax,
            depth,
            spacing,
            radius,
            fill,
            border,
            no_rivets,
            rivet_kind,
            output,
            rgba,
            dump_config,
        } => {
            let overrides = GenerateOverrides {
                draw_type,
                dmin,
                dmax,
                depth,
                spacing,
                radius,
                fill,
                border,
                no_rivets,
                rivet_kind,
            };
            cmd_generate(
                &canvas,
                &overrides,
                output.as_deref(),
                rgba,
                dump_config.as_deref(),
            )
        }

        Commands::Boxes {
            canvas,
            count,
            outline,
            line_width,
            wmin,
            wmax,
            hmin,
            hmax,
            output,
        } => {
            let overrides = BoxesOverrides {
                count,
                outline,
                line_width,
                wmin,
                wmax,
                hmin,
                hmax,
            };
            cmd_boxes(&canvas, &overrides, output.as_deref())
        }

        Commands::Cells { canvas, json } => cmd_cells(&canvas, json),

        Commands::Init { path, force } => cmd_init(&path, force),

        Commands::Info => cmd_info(),
    }
}

// =============================================================================
// Parameter assembly
// =============================================================================

/// Generation flags layered over the config file
#[derive(Debug, Default)]
struct GenerateOverrides {
    draw_type: Option<DrawType>,
    dmin: Option<u32>,
    dmax: Option<u32>,
    depth: Option<u32>,
    spacing: Option<i32>,
    radius: Option<i32>,
    fill: Option<u8>,
    border: Option<u8>,
    no_rivets: bool,
    rivet_kind: Option<RivetKind>,
}

/// Random boxes flags layered over the config file
#[derive(Debug, Default)]
struct BoxesOverrides {
    count: Option<u32>,
    outline: bool,
    line_width: Option<f32>,
    wmin: Option<i32>,
    wmax: Option<i32>,
    hmin: Option<i32>,
    hmax: Option<i32>,
}

/// Apply size and seed flags; returns the seed actually used
fn apply_canvas(params: &mut GenerationParams, canvas: &CanvasArgs, randomize: bool) -> u64 {
    let (width, height) = canvas.size(params.width, params.height);
    params.width = width;
    params.height = height;
    params.seed = resolve_seed(canvas.seed.unwrap_or(params.seed), randomize);
    params.seed
}

fn apply_generate(params: &mut GenerationParams, overrides: &GenerateOverrides) {
    if let Some(draw_type) = overrides.draw_type {
        params.draw_type = draw_type;
    }
    if let Some(dmin) = overrides.dmin {
        params.dmin = dmin;
    }
    if let Some(dmax) = overrides.dmax {
        params.dmax = dmax;
    }
    if let Some(depth) = overrides.depth {
        params.depth = depth;
    }
    if let Some(spacing) = overrides.spacing {
        params.spacing = spacing;
    }
    if let Some(radius) = overrides.radius {
        params.corner_radius = radius;
    }
    if let Some(fill) = overrides.fill {
        params.fill = FillTone::Fixed(Tone::from_byte(fill));
    }
    if let Some(border) = overrides.border {
        params.border_tone = Tone::from_byte(border);
    }
    if let Some(kind) = overrides.rivet_kind {
        params.rivet.kind = kind;
    }
    if overrides.no_rivets {
        params.rivet.enabled = false;
    }
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_generate(
    canvas: &CanvasArgs,
    overrides: &GenerateOverrides,
    output: Option<&Path>,
    rgba: bool,
    dump_config: Option<&Path>,
) -> Result<()> {
    let mut config = GreebleConfig::resolve(canvas.config.as_deref())?;
    let randomize = canvas.randomize || config.output.randomize;

    let params = &mut config.generate;
    let seed = apply_canvas(params, canvas, randomize);
    apply_generate(params, overrides);

    info!(
        "Generating {}x{} texture (seed {}, draw type {})",
        params.width, params.height, seed, params.draw_type
    );

    let (texture, stats) = generate_with_stats(params).context("Generation failed")?;
    info!(
        "{} cells, {} skipped, {} patterns, {} rivet layers",
        stats.cells, stats.skipped, stats.patterns, stats.rivets
    );

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output.path.clone());
    let layout = if rgba || config.output.rgba {
        PixelLayout::Rgba
    } else {
        PixelLayout::Gray
    };
    export::save_canvas(&texture, &path, layout)?;

    if let Some(dump) = dump_config {
        // Record the resolved seed so a randomized run can be replayed
        config.output.randomize = false;
        config.output.path = path;
        config.save(dump)?;
        info!("Saved parameters to {}", dump.display());
    }

    Ok(())
}

fn cmd_boxes(canvas: &CanvasArgs, overrides: &BoxesOverrides, output: Option<&Path>) -> Result<()> {
    let config = GreebleConfig::resolve(canvas.config.as_deref())?;
    let (width, height) = canvas.size(config.generate.width, config.generate.height);

    let mut params = config.boxes.clone();
    params.seed = resolve_seed(
        canvas.seed.unwrap_or(params.seed),
        canvas.randomize || config.output.randomize,
    );
    if let Some(count) = overrides.count {
        params.count = count;
    }
    if overrides.outline {
        params.fill = false;
    }
    if let Some(line_width) = overrides.line_width {
        params.line_width = line_width;
    }
    params.wmin = overrides.wmin.unwrap_or(params.wmin);
    params.wmax = overrides.wmax.unwrap_or(params.wmax);
    params.hmin = overrides.hmin.unwrap_or(params.hmin);
    params.hmax = overrides.hmax.unwrap_or(params.hmax);

    info!(
        "Drawing {} boxes on {}x{} (seed {})",
        params.count, width, height, params.seed
    );
    let layer = render_boxes(width, height, &params).context("Box generation failed")?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("boxes.png"));
    // The box layer is mostly transparent, so keep alpha
    export::save_canvas(&layer, &path, PixelLayout::Rgba)
}

fn cmd_cells(canvas: &CanvasArgs, json: bool) -> Result<()> {
    let mut config = GreebleConfig::resolve(canvas.config.as_deref())?;
    let params = &mut config.generate;
    apply_canvas(params, canvas, canvas.randomize);
    params.validate().context("Invalid parameters")?;

    let mut rng = greeble_core::rng::seeded(params.seed);
    let cells = Partitioner::from_params(params).partition(params.width, params.height, &mut rng);

    if json {
        let text = serde_json::to_string_pretty(&cells).context("Failed to serialize cells")?;
        println!("{}", text);
    } else {
        for cell in &cells {
            println!(
                "{:>5} {:>5} {:>5} {:>5}  ({}x{})",
                cell.x0,
                cell.y0,
                cell.x1,
                cell.y1,
                cell.width(),
                cell.height()
            );
        }
        info!("{} cells (seed {})", cells.len(), params.seed);
    }

    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let target = if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    };

    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            target.display()
        );
    }

    GreebleConfig::default().save(&target)?;

    info!("Wrote {}", target.display());
    info!("Run `greeble generate` to render it");

    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("Greeble");
    println!("=======");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Patterns (weight, minimum drawable side):");
    let total: u32 = PATTERN_WEIGHTS.iter().map(|(_, w)| w).sum();
    for (kind, weight) in PATTERN_WEIGHTS {
        println!(
            "  - {:<14} {:>2}/{}  {:>3} px",
            kind.name(),
            weight,
            total,
            pattern::min_size(kind)
        );
    }
    println!();
    println!("Rivets (minimum drawable side):");
    for (kind, min) in [
        (RivetKind::Box, RIVET_BOX_MIN_SIZE),
        (RivetKind::Circle, RIVET_CIRCLE_MIN_SIZE),
    ] {
        println!("  - {:<14} {:>3} px", kind.to_string(), min);
    }
    println!();
    println!("Draw types: all, rect-only, or any pattern name");

    Ok(())
}
