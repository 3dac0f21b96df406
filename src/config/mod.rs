//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchboard/config.toml`. Settings include per-tool styles,
//! eraser tolerances, arrow appearance, text font and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{ArrowConfig, EraserConfig, TextConfig, ToolStyleConfig, ToolboxConfig};

use crate::draw::{FontDescriptor, HitThresholds};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [toolbox.brush]
/// stroke = "blue"
///
/// [toolbox.text]
/// size = 24.0
///
/// [eraser]
/// line_threshold = 0.5
/// circle_threshold = 5.0
///
/// [arrow]
/// length = 20.0
///
/// [text]
/// font_family = "Caveat"
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Per-tool stroke, fill and size defaults
    #[serde(default)]
    pub toolbox: ToolboxConfig,

    /// Eraser hit-test tolerances
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Arrow appearance settings
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Text font and measurement settings
    #[serde(default)]
    pub text: TextConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `eraser.line_threshold`: 0.01 - 50.0
    /// - `eraser.circle_threshold`: 0.1 - 50.0
    /// - `arrow.length`: 5.0 - 100.0
    /// - `text.average_glyph_width`: 0.1 - 2.0
    /// - `toolbox.*.size`: 0.5 - 200.0
    fn validate_and_clamp(&mut self) {
        if !(0.01..=50.0).contains(&self.eraser.line_threshold) {
            warn!(
                "Invalid eraser line_threshold {:.2}, clamping to 0.01-50.0 range",
                self.eraser.line_threshold
            );
            self.eraser.line_threshold = self.eraser.line_threshold.clamp(0.01, 50.0);
        }

        if !(0.1..=50.0).contains(&self.eraser.circle_threshold) {
            warn!(
                "Invalid eraser circle_threshold {:.1}, clamping to 0.1-50.0 range",
                self.eraser.circle_threshold
            );
            self.eraser.circle_threshold = self.eraser.circle_threshold.clamp(0.1, 50.0);
        }

        if !(5.0..=100.0).contains(&self.arrow.length) {
            warn!(
                "Invalid arrow length {:.1}, clamping to 5.0-100.0 range",
                self.arrow.length
            );
            self.arrow.length = self.arrow.length.clamp(5.0, 100.0);
        }

        if !(0.1..=2.0).contains(&self.text.average_glyph_width) {
            warn!(
                "Invalid text average_glyph_width {:.2}, clamping to 0.1-2.0 range",
                self.text.average_glyph_width
            );
            self.text.average_glyph_width = self.text.average_glyph_width.clamp(0.1, 2.0);
        }

        for (name, section) in self.toolbox.sections_mut() {
            match section.size {
                Some(size) if !(0.5..=200.0).contains(&size) => {
                    warn!("Invalid toolbox.{name}.size {size:.1}, clamping to 0.5-200.0 range");
                    section.size = Some(size.clamp(0.5, 200.0));
                }
                _ => {}
            }
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.text.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .text
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.text.font_weight
            );
            self.text.font_weight = "normal".to_string();
        }

        if !matches!(
            self.text.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.text.font_style
            );
            self.text.font_style = "normal".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses a TOML document and clamps out-of-range values.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Font used for text elements.
    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.text.font_family.clone(),
            self.text.font_weight.clone(),
            self.text.font_style.clone(),
        )
    }

    pub fn hit_thresholds(&self) -> HitThresholds {
        HitThresholds {
            line: self.eraser.line_threshold,
            circle: self.eraser.circle_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, BLUE};
    use crate::input::Tool;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.eraser.line_threshold, 0.1);
        assert_eq!(config.eraser.circle_threshold, 5.0);
        assert_eq!(config.arrow.length, 20.0);
        assert_eq!(config.text.font_family, "Caveat");
    }

    #[test]
    fn default_toolbox_styles() {
        let toolbox = ToolboxConfig::default();
        let rect = toolbox.get(Tool::Rectangle).unwrap().to_style();
        assert_eq!(rect.stroke, Some(BLACK));
        assert_eq!(rect.fill, None);
        assert_eq!(rect.size, Some(1.0));
        assert_eq!(toolbox.get(Tool::Text).unwrap().size, Some(32.0));
        assert!(toolbox.get(Tool::Eraser).is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [toolbox.line]
            stroke = "blue"

            [keybindings]
            undo = ["Ctrl+U"]
            "#,
        )
        .unwrap();
        assert_eq!(config.toolbox.line.to_style().stroke, Some(BLUE));
        assert_eq!(config.toolbox.line.size, None);
        assert_eq!(config.toolbox.rectangle, ToolboxConfig::default().rectangle);
        assert_eq!(config.keybindings.undo, vec!["Ctrl+U".to_string()]);
        assert_eq!(config.keybindings.redo, vec!["Ctrl+Y".to_string()]);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml(
            r#"
            [eraser]
            line_threshold = 0.0
            circle_threshold = 500.0

            [arrow]
            length = 1.0

            [text]
            average_glyph_width = 9.0
            font_weight = "chunky"

            [toolbox.arrow]
            size = -3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.eraser.line_threshold, 0.01);
        assert_eq!(config.eraser.circle_threshold, 50.0);
        assert_eq!(config.arrow.length, 5.0);
        assert_eq!(config.text.average_glyph_width, 2.0);
        assert_eq!(config.text.font_weight, "normal");
        assert_eq!(config.toolbox.arrow.size, Some(0.5));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[eraser\nline_threshold = ").is_err());
        assert!(Config::from_toml("[arrow]\nlength = \"long\"").is_err());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[arrow]\nlength = 30.0\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.arrow.length, 30.0);

        let missing = dir.path().join("missing.toml");
        let err = Config::load_from(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        for section in ["toolbox", "eraser", "arrow", "text", "keybindings"] {
            assert!(schema.contains(section), "schema is missing {section}");
        }
    }
}
