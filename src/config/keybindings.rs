//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize the undo/redo and tool-selection shortcuts.

use crate::input::{Modifiers, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // History
    Undo,
    Redo,

    // Toolbar
    SelectTool(Tool),
}

/// Named keys a binding may use besides single characters. These are the
/// names [`Key::binding_name`](crate::input::Key::binding_name) produces.
const NAMED_KEYS: [&str; 6] = ["Escape", "Return", "Backspace", "Delete", "Tab", "Space"];

/// A key plus the exact modifier set that must be held.
///
/// Single-character keys are stored upper-cased, so `"ctrl+z"` and `"Ctrl+Z"`
/// are the same binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parses `"Ctrl+Z"`, `"Shift+Ctrl+Z"`, `"B"` or `"Ctrl++"`.
    ///
    /// The last `+`-separated part is the key; everything before it must be a
    /// modifier (`Ctrl`/`Control`, `Shift`, `Alt`) in any order.
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let (modifiers, key) = if trimmed == "+" {
            ("", "+")
        } else if let Some(rest) = trimmed.strip_suffix("++") {
            (rest, "+")
        } else {
            match trimmed.rsplit_once('+') {
                Some((rest, key)) => (rest, key.trim()),
                None => ("", trimmed),
            }
        };

        let mut binding = Self {
            key: normalize_key(key).ok_or_else(|| format!("Invalid key in keybinding '{s}'"))?,
            ctrl: false,
            shift: false,
            alt: false,
        };

        if !modifiers.trim().is_empty() {
            for part in modifiers.split('+').map(str::trim) {
                match part.to_ascii_lowercase().as_str() {
                    "ctrl" | "control" => binding.ctrl = true,
                    "shift" => binding.shift = true,
                    "alt" => binding.alt = true,
                    _ => return Err(format!("Unknown modifier '{part}' in keybinding '{s}'")),
                }
            }
        }

        Ok(binding)
    }

    /// True when `key` (a binding name) pressed with exactly `modifiers`
    /// triggers this binding.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.ctrl
            && self.shift == modifiers.shift
            && self.alt == modifiers.alt
    }
}

/// Canonical form of a key name, or `None` if the board has no such key.
fn normalize_key(key: &str) -> Option<String> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_uppercase().collect()),
        (Some(_), Some(_)) => NAMED_KEYS
            .iter()
            .find(|name| name.eq_ignore_ascii_case(key))
            .map(|name| name.to_string()),
        (None, _) => None,
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// select_eraser = ["E"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_select_brush")]
    pub select_brush: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_circle")]
    pub select_circle: Vec<String>,

    #[serde(default = "default_select_ellipse")]
    pub select_ellipse: Vec<String>,

    #[serde(default = "default_select_arrow")]
    pub select_arrow: Vec<String>,

    #[serde(default = "default_select_text")]
    pub select_text: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            select_brush: default_select_brush(),
            select_line: default_select_line(),
            select_rectangle: default_select_rectangle(),
            select_circle: default_select_circle(),
            select_ellipse: default_select_ellipse(),
            select_arrow: default_select_arrow(),
            select_text: default_select_text(),
            select_eraser: default_select_eraser(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        // Helper closure to insert and check for duplicates
        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding, action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        for binding_str in &self.undo {
            insert_binding(binding_str, Action::Undo)?;
        }

        for binding_str in &self.redo {
            insert_binding(binding_str, Action::Redo)?;
        }

        let tool_bindings = [
            (Tool::Brush, &self.select_brush),
            (Tool::Line, &self.select_line),
            (Tool::Rectangle, &self.select_rectangle),
            (Tool::Circle, &self.select_circle),
            (Tool::Ellipse, &self.select_ellipse),
            (Tool::Arrow, &self.select_arrow),
            (Tool::Text, &self.select_text),
            (Tool::Eraser, &self.select_eraser),
        ];
        for (tool, bindings) in tool_bindings {
            for binding_str in bindings {
                insert_binding(binding_str, Action::SelectTool(tool))?;
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string()]
}

fn default_select_brush() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["L".to_string()]
}

fn default_select_rectangle() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_select_circle() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_select_ellipse() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_select_arrow() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_select_text() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["E".to_string()]
}
