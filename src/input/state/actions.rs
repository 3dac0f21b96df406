use crate::config::{Action, ColorSpec};
use crate::draw::Color;
use crate::error::BoardError;
use crate::input::events::{BoardEvent, Key};
use crate::input::modifiers::Modifiers;
use crate::input::tool::Tool;
use crate::input::toolbox::Toolbox;
use log::debug;

use super::{BoardState, Phase};

impl BoardState {
    /// Makes `tool` the active tool. The phase is left as it is.
    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!("Tool: {} -> {}", self.tool, tool);
            self.tool = tool;
            self.needs_redraw = true;
        }
    }

    /// Drops an unfinished gesture by restoring the current snapshot.
    ///
    /// The element under construction is discarded and the phase returns to
    /// `None`, so nothing can write into a committed element afterwards.
    fn abandon_gesture(&mut self) {
        if self.phase == Phase::None {
            return;
        }
        debug!("Abandoning {} gesture", self.phase);
        self.elements = self.history.current().to_vec();
        self.phase = Phase::None;
        self.needs_redraw = true;
    }

    /// Steps back one history entry; no-op at the oldest entry.
    ///
    /// A gesture in progress is abandoned first.
    pub fn undo(&mut self) {
        self.abandon_gesture();
        if let Some(snapshot) = self.history.undo() {
            self.elements = snapshot.to_vec();
            self.needs_redraw = true;
            debug!("Undo: cursor {}", self.history.cursor());
        }
    }

    /// Steps forward one history entry; no-op at the newest entry.
    ///
    /// A gesture in progress is abandoned first.
    pub fn redo(&mut self) {
        self.abandon_gesture();
        if let Some(snapshot) = self.history.redo() {
            self.elements = snapshot.to_vec();
            self.needs_redraw = true;
            debug!("Redo: cursor {}", self.history.cursor());
        }
    }

    /// Processes a key press against the configured bindings.
    ///
    /// Keys are ignored while a text box is open so typing never triggers
    /// shortcuts. Returns the action that was applied, if any.
    pub fn on_key_press(&mut self, key: Key, modifiers: Modifiers) -> Option<Action> {
        if self.phase == Phase::Writing {
            return None;
        }

        let action = self.find_action(&key.binding_name()?, modifiers)?;
        self.handle_action(action);
        Some(action)
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::SelectTool(tool) => self.select_tool(tool),
        }
    }

    /// Whether `event` passes its guard in the current phase and history
    /// position. Rejected events are no-ops when applied.
    pub fn accepts(&self, event: &BoardEvent) -> bool {
        match event {
            BoardEvent::PointerDown { .. } => self.phase != Phase::Writing,
            BoardEvent::PointerMove { .. } | BoardEvent::PointerUp => {
                matches!(self.phase, Phase::Drawing | Phase::Erasing)
            }
            BoardEvent::TextCommit { .. } => self.phase == Phase::Writing,
            BoardEvent::Undo => self.phase != Phase::None || self.history.can_undo(),
            BoardEvent::Redo => self.phase != Phase::None || self.history.can_redo(),
            BoardEvent::KeyPress { key, modifiers } => {
                self.phase != Phase::Writing
                    && Key::from_name(key)
                        .binding_name()
                        .and_then(|name| self.find_action(&name, *modifiers))
                        .is_some()
            }
            BoardEvent::SelectTool { .. }
            | BoardEvent::SetStroke { .. }
            | BoardEvent::SetFill { .. }
            | BoardEvent::SetSize { .. } => true,
        }
    }

    /// Applies one input event, reading and updating `toolbox` as needed.
    ///
    /// Pointer-down uses the active tool's toolbox style unless the event
    /// carries its own. Toolbox events without a tool target the active tool.
    pub fn apply(&mut self, event: &BoardEvent, toolbox: &mut Toolbox) -> Result<(), BoardError> {
        match event {
            BoardEvent::SelectTool { tool } => self.select_tool(*tool),
            BoardEvent::PointerDown { x, y, style } => {
                let style = match style {
                    Some(style) => style.to_style(),
                    None => toolbox.style_for(self.tool),
                };
                self.on_pointer_down(*x, *y, &style)?;
            }
            BoardEvent::PointerMove { x, y } => self.on_pointer_move(*x, *y)?,
            BoardEvent::PointerUp => self.on_pointer_up(),
            BoardEvent::TextCommit { text } => self.commit_text(text),
            BoardEvent::Undo => self.undo(),
            BoardEvent::Redo => self.redo(),
            BoardEvent::KeyPress { key, modifiers } => {
                self.on_key_press(Key::from_name(key), *modifiers);
            }
            BoardEvent::SetStroke { tool, color } => {
                if let Some(color) = resolve_color(color.as_ref()) {
                    toolbox.set_stroke(tool.unwrap_or(self.tool), color);
                }
            }
            BoardEvent::SetFill { tool, color } => {
                if let Some(color) = resolve_color(color.as_ref()) {
                    toolbox.set_fill(tool.unwrap_or(self.tool), color);
                }
            }
            BoardEvent::SetSize { tool, size } => {
                toolbox.set_size(tool.unwrap_or(self.tool), *size);
            }
        }
        Ok(())
    }
}

/// Resolves an optional color from an event.
///
/// The outer `None` means the name was not recognized and the toolbox keeps
/// its current value.
fn resolve_color(spec: Option<&ColorSpec>) -> Option<Option<Color>> {
    match spec {
        Some(spec) => spec.to_color().map(Some),
        None => Some(None),
    }
}
