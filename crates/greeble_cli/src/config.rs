//! Greeble configuration file handling
//!
//! A `greeble.toml` holds the generation parameters, the random boxes
//! parameters and output settings. Every field is optional; missing fields
//! take the generator defaults. Command-line flags override the file.

use anyhow::{Context, Result};
use greeble_texture::{BoxesParams, GenerationParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name looked up in a directory
pub const CONFIG_FILE: &str = "greeble.toml";

// =============================================================================
// greeble.toml
// =============================================================================

/// Workspace-level greeble configuration (greeble.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GreebleConfig {
    pub output: OutputConfig,
    pub generate: GenerationParams,
    pub boxes: BoxesParams,
}

/// Where and how images are written
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file; the extension picks the format (png or bmp)
    pub path: PathBuf,
    /// Write RGBA instead of 8-bit grayscale
    pub rgba: bool,
    /// Derive the seed from the clock instead of using the configured one
    pub randomize: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("greeble.png"),
            rgba: false,
            randomize: false,
        }
    }
}

impl GreebleConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: GreebleConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load `greeble.toml` from a directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `greeble init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        Self::load(&config_path)
    }

    /// Load an explicit file, or `greeble.toml` in the working directory if
    /// present, or fall back to defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let cwd = std::env::current_dir()?;
        if cwd.join(CONFIG_FILE).exists() {
            tracing::debug!("Using {}", cwd.join(CONFIG_FILE).display());
            return Self::load_from_dir(&cwd);
        }

        Ok(Self::default())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize greeble config")
    }

    /// Write to a file, replacing it
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeble_texture::{DrawType, FillTone, PatternKind, RivetKind, Tone};

    #[test]
    fn test_defaults_round_trip() {
        let config = GreebleConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: GreebleConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config() {
        let text = r#"
            [output]
            path = "panels.bmp"

            [generate]
            width = 1024
            height = 768
            seed = 99
            draw_type = "angled-line-b"
            fill = { fixed = 0.5 }

            [generate.rivet]
            kind = "circle"
            background = true

            [boxes]
            count = 64
            fill = false
        "#;
        let config: GreebleConfig = toml::from_str(text).unwrap();

        assert_eq!(config.output.path, PathBuf::from("panels.bmp"));
        assert!(!config.output.rgba);

        let params = &config.generate;
        assert_eq!((params.width, params.height), (1024, 768));
        assert_eq!(params.seed, 99);
        assert_eq!(params.draw_type, DrawType::Single(PatternKind::AngledLineB));
        assert_eq!(params.fill, FillTone::Fixed(Tone::new(0.5)));
        assert_eq!(params.rivet.kind, RivetKind::Circle);
        assert!(params.rivet.background);
        assert_eq!(params.dmax, GenerationParams::default().dmax);

        assert_eq!(config.boxes.count, 64);
        assert!(!config.boxes.fill);
        assert_eq!(config.boxes.hmax, 128);
    }

    #[test]
    fn test_unknown_draw_type_is_rejected() {
        let text = "[generate]\ndraw_type = \"spirals\"\n";
        assert!(toml::from_str::<GreebleConfig>(text).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("greeble-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut config = GreebleConfig::default();
        config.generate.seed = 1234;
        config.output.rgba = true;
        config.save(&dir.join(CONFIG_FILE)).unwrap();

        let loaded = GreebleConfig::load_from_dir(&dir).unwrap();
        assert_eq!(loaded, config);

        fs::remove_dir_all(&dir).unwrap();
        assert!(GreebleConfig::load_from_dir(&dir).is_err());
    }
}
