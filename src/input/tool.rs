//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what element is created when the user drags on
/// the board. Every tool except the eraser maps to exactly one element variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path
    #[default]
    Brush,
    /// Straight line between start and end points
    Line,
    /// Rectangle outline from corner to corner
    Rectangle,
    /// Circle around the start point, radius set by the drag
    Circle,
    /// Ellipse inscribed in the dragged box
    Ellipse,
    /// Line with an arrowhead at the end point
    Arrow,
    /// Text box anchored where the pointer went down
    Text,
    /// Removes every element the pointer passes over
    Eraser,
}

impl Tool {
    /// All tools in toolbar order.
    pub const ALL: [Tool; 8] = [
        Tool::Brush,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Ellipse,
        Tool::Arrow,
        Tool::Text,
        Tool::Eraser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Ellipse => "ellipse",
            Tool::Arrow => "arrow",
            Tool::Text => "text",
            Tool::Eraser => "eraser",
        }
    }

    /// Whether pointer-down with this tool adds an element.
    pub fn creates_elements(self) -> bool {
        self != Tool::Eraser
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown tool '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_names() {
        for tool in Tool::ALL {
            assert_eq!(tool.to_string().parse::<Tool>(), Ok(tool));
        }
        assert_eq!(" Rectangle ".parse::<Tool>(), Ok(Tool::Rectangle));
        assert!("pen".parse::<Tool>().is_err());
    }

    #[test]
    fn only_eraser_has_no_element() {
        let without: Vec<Tool> = Tool::ALL
            .into_iter()
            .filter(|tool| !tool.creates_elements())
            .collect();
        assert_eq!(without, vec![Tool::Eraser]);
    }
}
