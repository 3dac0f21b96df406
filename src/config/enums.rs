//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color (or "#rrggbb")
/// stroke = "red"
///
/// # Custom RGB color (0-255 per component)
/// fill = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black, or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors are mapped to predefined RGBA values using `util::name_to_color()`.
    /// Unknown names log a warning and yield `None` so no color is silently
    /// substituted. RGB arrays are converted from 0-255 to 0.0-1.0 with full opacity.
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => {
                let color = crate::util::name_to_color(name);
                if color.is_none() {
                    warn!("Unknown color '{}', leaving it unset", name);
                }
                color
            }
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgb8(*r, *g, *b)),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}
