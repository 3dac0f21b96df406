//! Event scripts: JSON lists of [`BoardEvent`]s replayed against a board.

use crate::error::BoardError;
use crate::input::{BoardEvent, BoardState, Toolbox};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

/// Parses a JSON array of board events.
pub fn parse_events(source: &str) -> Result<Vec<BoardEvent>> {
    serde_json::from_str(source).context("Invalid event script")
}

/// Reads and parses the event script at `path`.
pub fn load_events(path: &Path) -> Result<Vec<BoardEvent>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event script {}", path.display()))?;
    let events = parse_events(&source)
        .with_context(|| format!("Failed to parse event script {}", path.display()))?;
    info!("Loaded {} event(s) from {}", events.len(), path.display());
    Ok(events)
}

/// Applies `events` in order, stopping at the first failing transition.
///
/// Events whose guard does not hold are still applied (as no-ops) but logged,
/// since a script that relies on them is usually out of step with the board.
/// Returns the number of ignored events.
pub fn replay(
    state: &mut BoardState,
    toolbox: &mut Toolbox,
    events: &[BoardEvent],
) -> Result<usize, BoardError> {
    let mut ignored = 0;
    for (index, event) in events.iter().enumerate() {
        if state.accepts(event) {
            debug!("Event {index}: {event:?}");
        } else {
            warn!("Event {index} ignored in phase {}: {event:?}", state.phase());
            ignored += 1;
        }
        state.apply(event, toolbox)?;
    }
    Ok(ignored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Phase, Tool};

    #[test]
    fn replay_draws_and_commits() {
        let events = parse_events(
            r#"[
                {"event": "select_tool", "tool": "arrow"},
                {"event": "pointer_down", "x": 0, "y": 0},
                {"event": "pointer_move", "x": 80, "y": 10},
                {"event": "pointer_up"}
            ]"#,
        )
        .unwrap();

        let mut state = BoardState::default();
        let mut toolbox = Toolbox::default();
        let ignored = replay(&mut state, &mut toolbox, &events).unwrap();

        assert_eq!(ignored, 0);
        assert_eq!(state.elements().len(), 1);
        assert_eq!(state.elements()[0].tool(), Tool::Arrow);
        assert_eq!(state.phase(), Phase::None);
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn replay_counts_guarded_no_ops() {
        let events = parse_events(
            r#"[
                {"event": "undo"},
                {"event": "pointer_up"},
                {"event": "text_commit", "text": "orphan"},
                {"event": "key_press", "key": "q"},
                {"event": "select_tool", "tool": "line"},
                {"event": "pointer_down", "x": 0, "y": 0},
                {"event": "pointer_up"},
                {"event": "redo"}
            ]"#,
        )
        .unwrap();

        let mut state = BoardState::default();
        let mut toolbox = Toolbox::default();
        let ignored = replay(&mut state, &mut toolbox, &events).unwrap();

        assert_eq!(ignored, 5);
        assert_eq!(state.elements().len(), 1);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn unknown_event_is_rejected() {
        let err = parse_events(r#"[{"event": "teleport"}]"#).unwrap_err();
        assert!(err.to_string().contains("Invalid event script"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_events(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read event script"));
    }
}
