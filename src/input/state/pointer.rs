use crate::draw::{Element, ElementStyle, HitTester};
use crate::error::BoardError;
use crate::input::tool::Tool;
use log::debug;

use super::{BoardState, Phase};

impl BoardState {
    /// Processes a pointer press at `(x, y)`.
    ///
    /// # Behavior
    /// - While writing: ignored
    /// - Eraser: enters `Erasing`
    /// - Any other tool: appends a new element (id = element count) and enters
    ///   `Writing` for text, `Drawing` otherwise
    ///
    /// # Errors
    /// Only if the factory rejects the tool; the board is left unchanged.
    pub fn on_pointer_down(&mut self, x: f64, y: f64, style: &ElementStyle) -> Result<(), BoardError> {
        if self.phase == Phase::Writing {
            return Ok(());
        }

        if self.tool == Tool::Eraser {
            self.phase = Phase::Erasing;
            debug!("Pointer down at ({x:.1}, {y:.1}): erasing");
            return Ok(());
        }

        let id = self.elements.len();
        let element = self.factory.create(id, x, y, x, y, self.tool, style)?;
        self.elements.push(element);
        self.phase = if self.tool == Tool::Text {
            Phase::Writing
        } else {
            Phase::Drawing
        };
        self.needs_redraw = true;
        debug!(
            "Pointer down at ({x:.1}, {y:.1}): started {} #{id}, phase {}",
            self.tool, self.phase
        );
        Ok(())
    }

    /// Processes pointer motion to `(x, y)`.
    ///
    /// # Behavior
    /// - Erasing: removes every element near the pointer from the live list
    /// - Drawing: extends the brush stroke or rebuilds the last shape
    /// - Otherwise: ignored
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<(), BoardError> {
        match self.phase {
            Phase::Erasing => {
                let tester = HitTester::new(self.thresholds, self.measure.as_ref(), &self.font);
                let before = self.elements.len();
                self.elements
                    .retain(|element| !tester.is_near_element(element, x, y));
                let removed = before - self.elements.len();
                if removed > 0 {
                    debug!("Erased {removed} element(s) at ({x:.1}, {y:.1})");
                    self.needs_redraw = true;
                }
            }
            Phase::Drawing => {
                let Some(last) = self.elements.last_mut() else {
                    return Ok(());
                };
                match last {
                    Element::Brush(brush) => self.factory.extend_brush(brush, x, y),
                    Element::Text(_) => return Ok(()),
                    shape => {
                        let tool = shape.tool();
                        let Some(current) = shape.as_shape() else {
                            return Ok(());
                        };
                        let rebuilt = self.factory.rebuild_shape(tool, current, x, y)?;
                        *shape = rebuilt;
                    }
                }
                self.needs_redraw = true;
            }
            Phase::None | Phase::Writing => {}
        }
        Ok(())
    }

    /// Processes a pointer release.
    ///
    /// Ends a drawing or erasing gesture by committing the live list as one
    /// history entry. Ignored in any other phase.
    pub fn on_pointer_up(&mut self) {
        if matches!(self.phase, Phase::Drawing | Phase::Erasing) {
            debug!("Pointer up: committing {} element(s)", self.elements.len());
            self.commit();
        }
    }

    /// Sets the text of the element being written and commits it.
    ///
    /// Ignored unless the board is in `Writing`.
    pub fn commit_text(&mut self, text: &str) {
        if self.phase != Phase::Writing {
            return;
        }
        if let Some(Element::Text(element)) = self.elements.last_mut() {
            element.text = text.to_string();
        }
        debug!("Text committed ({} chars)", text.chars().count());
        self.commit();
    }
}
