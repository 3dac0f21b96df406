//! Board state machine and its data.

use super::history::History;
use crate::config::{Action, Config, KeyBinding, KeybindingsConfig};
use crate::draw::{
    ApproxTextMeasure, Color, Element, ElementFactory, FontDescriptor, HitThresholds, TextMeasure,
};
use crate::error::BoardError;
use crate::input::{modifiers::Modifiers, tool::Tool};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Interaction phase of the board.
///
/// ```text
/// None --pointer-down--> Drawing | Erasing | Writing
/// Drawing | Erasing --pointer-up--> None
/// Writing --text-commit--> None
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a pointer-down
    #[default]
    None,
    /// Pointer held with a drawing tool; the last element is under construction
    Drawing,
    /// Pointer held with the eraser
    Erasing,
    /// A text element is waiting for its content
    Writing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::None => "none",
            Phase::Drawing => "drawing",
            Phase::Erasing => "erasing",
            Phase::Writing => "writing",
        };
        f.write_str(name)
    }
}

/// Where the presenter should open its text entry box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: Option<Color>,
}

/// The drawing board: element list, active tool, phase and history.
///
/// All mutation goes through the transition methods (`on_pointer_down`,
/// `on_pointer_move`, `on_pointer_up`, `commit_text`, `undo`, `redo`,
/// `select_tool`, `on_key_press`). Each one either applies completely or
/// leaves the board untouched.
pub struct BoardState {
    /// Tool used by the next pointer-down
    pub(super) tool: Tool,
    pub(super) phase: Phase,
    /// Live element list; equals `history.current()` outside a gesture
    pub(super) elements: Vec<Element>,
    pub(super) history: History,
    pub(super) factory: ElementFactory,
    pub(super) thresholds: HitThresholds,
    pub(super) font: FontDescriptor,
    pub(super) measure: Box<dyn TextMeasure>,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Whether the presenter needs to redraw
    pub(super) needs_redraw: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        let action_map = KeybindingsConfig::default()
            .build_action_map()
            .unwrap_or_default();
        Self::with_defaults(
            ElementFactory::default(),
            HitThresholds::default(),
            FontDescriptor::default(),
            action_map,
        )
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("tool", &self.tool)
            .field("phase", &self.phase)
            .field("elements", &self.elements.len())
            .field("cursor", &self.history.cursor())
            .field("history", &self.history.len())
            .finish()
    }
}

impl BoardState {
    /// Creates an empty board: one empty snapshot, cursor 0, phase `None`.
    ///
    /// Text is measured with [`ApproxTextMeasure`] until a presenter installs a
    /// real measurer with [`set_text_measurer`](Self::set_text_measurer).
    pub fn with_defaults(
        factory: ElementFactory,
        thresholds: HitThresholds,
        font: FontDescriptor,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            tool: Tool::default(),
            phase: Phase::None,
            elements: Vec::new(),
            history: History::new(),
            factory,
            thresholds,
            font,
            measure: Box::new(ApproxTextMeasure::default()),
            action_map,
            needs_redraw: true,
        }
    }

    /// Builds a board from user configuration.
    ///
    /// # Errors
    /// [`BoardError::Keybindings`] when a binding fails to parse or two actions
    /// share a binding.
    pub fn from_config(config: &Config) -> Result<Self, BoardError> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(BoardError::Keybindings)?;

        let mut state = Self::with_defaults(
            ElementFactory::new(config.arrow.length),
            config.hit_thresholds(),
            config.font(),
            action_map,
        );
        state.measure = Box::new(ApproxTextMeasure {
            average_glyph_width: config.text.average_glyph_width,
        });
        Ok(state)
    }

    /// Replaces the text measurer used by the eraser.
    pub fn set_text_measurer(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Elements to display, bottom layer first.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    pub fn thresholds(&self) -> HitThresholds {
        self.thresholds
    }

    /// Text entry box for the element being written, if any.
    pub fn pending_text_box(&self) -> Option<TextBox> {
        if self.phase != Phase::Writing {
            return None;
        }
        let text = self.elements.last()?.as_text()?;
        Some(TextBox {
            x: text.x1,
            y: text.y1,
            font_size: text.font_size(),
            color: text.stroke,
        })
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Looks up the action bound to `key` with `modifiers`.
    pub(super) fn find_action(&self, key: &str, modifiers: Modifiers) -> Option<Action> {
        for (binding, action) in &self.action_map {
            if binding.matches(key, modifiers) {
                return Some(*action);
            }
        }
        None
    }

    /// Records the live list as a new history entry and returns to `None`.
    pub(super) fn commit(&mut self) {
        self.history.commit(self.elements.clone());
        self.phase = Phase::None;
        self.needs_redraw = true;
    }
}
