//! Undo/redo history of committed element lists.

use crate::draw::Element;

/// Ordered snapshots of the element list plus a cursor.
///
/// There is always at least one snapshot and `cursor < len()`. Committing
/// drops every snapshot after the cursor, so a new edit after an undo discards
/// the redo branch. The history is unbounded.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// History holding a single empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &[Element] {
        &self.snapshots[self.cursor]
    }

    pub fn snapshots(&self) -> &[Vec<Element>] {
        &self.snapshots
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Truncates after the cursor, appends `snapshot` and moves onto it.
    pub fn commit(&mut self, snapshot: Vec<Element>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Steps back; `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Steps forward; `None` at the newest snapshot.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{ElementStyle, create_element};
    use crate::input::Tool;

    fn line(id: usize) -> Element {
        create_element(id, 0.0, 0.0, 10.0, 10.0, Tool::Line, &ElementStyle::default()).unwrap()
    }

    #[test]
    fn starts_with_one_empty_snapshot() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_and_redo_stop_at_the_ends() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        history.commit(vec![line(0)]);
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);

        assert_eq!(history.undo().map(<[Element]>::len), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.redo().map(<[Element]>::len), Some(1));
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn commit_after_undo_drops_redo_branch() {
        let mut history = History::new();
        history.commit(vec![line(0)]);
        history.commit(vec![line(0), line(1)]);
        history.undo();
        history.undo();

        history.commit(vec![line(0)]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(!history.can_redo());
    }
}
