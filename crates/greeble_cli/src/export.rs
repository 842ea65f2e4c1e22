//! Image file export

use anyhow::{Context, Result};
use greeble_texture::Canvas;
use image::{GrayImage, ImageFormat, RgbaImage};
use std::path::Path;

/// Pixel layout written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 8-bit luminance, alpha dropped
    Gray,
    /// Straight-alpha RGBA
    Rgba,
}

/// Format implied by the file extension; only PNG and BMP are written
pub fn format_for(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Cannot infer image format from {}", path.display()))?;

    match format {
        ImageFormat::Png | ImageFormat::Bmp => Ok(format),
        other => anyhow::bail!(
            "Unsupported output format {:?} for {}. Use .png or .bmp",
            other,
            path.display()
        ),
    }
}

/// Encode a canvas to `path`
pub fn save_canvas(canvas: &Canvas, path: &Path, layout: PixelLayout) -> Result<()> {
    let format = format_for(path)?;
    let (width, height) = (canvas.width(), canvas.height());

    match layout {
        PixelLayout::Gray => {
            let image = GrayImage::from_raw(width, height, canvas.to_gray8())
                .context("Canvas buffer does not match its dimensions")?;
            image
                .save_with_format(path, format)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        PixelLayout::Rgba => {
            let image = RgbaImage::from_raw(width, height, canvas.to_rgba8())
                .context("Canvas buffer does not match its dimensions")?;
            image
                .save_with_format(path, format)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    tracing::info!("Wrote {}x{} {:?} image to {}", width, height, layout, path.display());
    Ok(())
}
