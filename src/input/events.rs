//! Board input events.
//!
//! Presenters translate their native pointer and keyboard events into these
//! values; event scripts use the same types in JSON form.

use super::modifiers::Modifiers;
use super::tool::Tool;
use crate::config::{ColorSpec, ToolStyleConfig};
use serde::Deserialize;

/// Generic key representation for cross-backend compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Backspace,
    Delete,
    Tab,
    Space,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Parses a key name as used in event scripts ("z", "Escape", "Space").
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                ' ' => Key::Space,
                c => Key::Char(c),
            };
        }
        match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            _ => Key::Unknown,
        }
    }

    /// Key name as written in keybinding strings, if it can be bound.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_string()),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Unknown => return None,
        };
        Some(name.to_string())
    }
}

/// One input event for the board.
///
/// Serialized with an `event` tag, e.g.
/// `{"event": "pointer_down", "x": 10, "y": 20}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    SelectTool {
        tool: Tool,
    },
    /// `style` overrides the toolbox for this one element.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        style: Option<ToolStyleConfig>,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    TextCommit {
        text: String,
    },
    Undo,
    Redo,
    KeyPress {
        key: String,
        #[serde(flatten)]
        modifiers: Modifiers,
    },
    /// Options panel: change the stroke color of `tool` (active tool when absent).
    SetStroke {
        #[serde(default)]
        tool: Option<Tool>,
        color: Option<ColorSpec>,
    },
    SetFill {
        #[serde(default)]
        tool: Option<Tool>,
        color: Option<ColorSpec>,
    },
    SetSize {
        #[serde(default)]
        tool: Option<Tool>,
        size: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse() {
        assert_eq!(Key::from_name("z"), Key::Char('z'));
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("enter"), Key::Return);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("F13"), Key::Unknown);
        assert_eq!(Key::Unknown.binding_name(), None);
        assert_eq!(Key::Char('Z').binding_name().as_deref(), Some("Z"));
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let events: Vec<BoardEvent> = serde_json::from_str(
            r#"[
                {"event": "select_tool", "tool": "rectangle"},
                {"event": "pointer_down", "x": 1, "y": 2.5},
                {"event": "pointer_move", "x": 3, "y": 4},
                {"event": "pointer_up"},
                {"event": "key_press", "key": "z", "ctrl": true},
                {"event": "set_fill", "color": "red"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events[0],
            BoardEvent::SelectTool {
                tool: Tool::Rectangle
            }
        );
        assert!(matches!(
            events[1],
            BoardEvent::PointerDown {
                x,
                y,
                style: None
            } if x == 1.0 && y == 2.5
        ));
        assert_eq!(events[3], BoardEvent::PointerUp);
        assert_eq!(
            events[4],
            BoardEvent::KeyPress {
                key: "z".into(),
                modifiers: Modifiers::ctrl(),
            }
        );
        assert!(matches!(
            &events[5],
            BoardEvent::SetFill { tool: None, color: Some(ColorSpec::Name(name)) } if name == "red"
        ));
    }
}
