//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::ElementStyle;
use crate::input::Tool;
use crate::util;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-tool drawing style, read by the board at pointer-down.
///
/// Unset values stay unset on the element; the sketch generator then uses its
/// own defaults (black, 1px).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ToolStyleConfig {
    /// Outline color (named color, `#rrggbb` or `[r, g, b]`)
    #[serde(default)]
    pub stroke: Option<ColorSpec>,

    /// Interior color for closed shapes; no fill when absent
    #[serde(default)]
    pub fill: Option<ColorSpec>,

    /// Stroke width in pixels (font size for the text tool)
    #[serde(default)]
    pub size: Option<f64>,
}

impl ToolStyleConfig {
    fn shape() -> Self {
        Self {
            stroke: Some(ColorSpec::from("black")),
            fill: None,
            size: Some(1.0),
        }
    }

    pub fn to_style(&self) -> ElementStyle {
        ElementStyle {
            stroke: self.stroke.as_ref().and_then(ColorSpec::to_color),
            fill: self.fill.as_ref().and_then(ColorSpec::to_color),
            size: self.size,
        }
    }
}

/// Default styles for every drawing tool.
///
/// # Example TOML
/// ```toml
/// [toolbox.rectangle]
/// stroke = "blue"
/// fill = [255, 230, 180]
/// size = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolboxConfig {
    #[serde(default = "default_brush_style")]
    pub brush: ToolStyleConfig,

    #[serde(default = "ToolStyleConfig::shape")]
    pub line: ToolStyleConfig,

    #[serde(default = "ToolStyleConfig::shape")]
    pub rectangle: ToolStyleConfig,

    #[serde(default = "ToolStyleConfig::shape")]
    pub circle: ToolStyleConfig,

    #[serde(default = "ToolStyleConfig::shape")]
    pub ellipse: ToolStyleConfig,

    #[serde(default = "ToolStyleConfig::shape")]
    pub arrow: ToolStyleConfig,

    #[serde(default = "default_text_style")]
    pub text: ToolStyleConfig,
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            brush: default_brush_style(),
            line: ToolStyleConfig::shape(),
            rectangle: ToolStyleConfig::shape(),
            circle: ToolStyleConfig::shape(),
            ellipse: ToolStyleConfig::shape(),
            arrow: ToolStyleConfig::shape(),
            text: default_text_style(),
        }
    }
}

impl ToolboxConfig {
    /// Style section for `tool`; the eraser has none.
    pub fn get(&self, tool: Tool) -> Option<&ToolStyleConfig> {
        match tool {
            Tool::Brush => Some(&self.brush),
            Tool::Line => Some(&self.line),
            Tool::Rectangle => Some(&self.rectangle),
            Tool::Circle => Some(&self.circle),
            Tool::Ellipse => Some(&self.ellipse),
            Tool::Arrow => Some(&self.arrow),
            Tool::Text => Some(&self.text),
            Tool::Eraser => None,
        }
    }

    pub(super) fn sections_mut(&mut self) -> [(&'static str, &mut ToolStyleConfig); 7] {
        [
            ("brush", &mut self.brush),
            ("line", &mut self.line),
            ("rectangle", &mut self.rectangle),
            ("circle", &mut self.circle),
            ("ellipse", &mut self.ellipse),
            ("arrow", &mut self.arrow),
            ("text", &mut self.text),
        ]
    }
}

/// Eraser hit-test tolerances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Slack in pixels for the sum-of-distances line test (valid range: 0.01 - 50.0)
    #[serde(default = "default_line_threshold")]
    pub line_threshold: f64,

    /// Maximum distance in pixels from a circle's rim (valid range: 0.1 - 50.0)
    #[serde(default = "default_circle_threshold")]
    pub circle_threshold: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            line_threshold: default_line_threshold(),
            circle_threshold: default_circle_threshold(),
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead barb length in pixels (valid range: 5.0 - 100.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
        }
    }
}

/// Text rendering and measurement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Font family name for text rendering (e.g., "Caveat", "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Average glyph advance as a fraction of the font size, used when no font
    /// backend is available to measure text (valid range: 0.1 - 2.0)
    #[serde(default = "default_average_glyph_width")]
    pub average_glyph_width: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            average_glyph_width: default_average_glyph_width(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_brush_style() -> ToolStyleConfig {
    ToolStyleConfig {
        stroke: Some(ColorSpec::from("black")),
        fill: None,
        size: None,
    }
}

fn default_text_style() -> ToolStyleConfig {
    ToolStyleConfig {
        stroke: Some(ColorSpec::from("black")),
        fill: None,
        size: Some(crate::draw::element::DEFAULT_FONT_SIZE),
    }
}

fn default_line_threshold() -> f64 {
    util::LINE_THRESHOLD
}

fn default_circle_threshold() -> f64 {
    util::CIRCLE_THRESHOLD
}

fn default_arrow_length() -> f64 {
    util::ARROW_LENGTH
}

fn default_font_family() -> String {
    "Caveat".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_average_glyph_width() -> f64 {
    0.5
}
