//! Error types for board operations.

use crate::input::Tool;
use thiserror::Error;

/// Errors raised by the element factory, board setup and the presentation layer.
///
/// Guard mismatches (e.g. a pointer-move while idle) and history bounds are not
/// errors; those transitions are silent no-ops.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The tool has no element representation (e.g. the eraser).
    #[error("Tool '{0}' cannot create drawing elements")]
    UnsupportedTool(Tool),

    /// The configured keybindings are malformed or overlap.
    #[error("Invalid keybindings: {0}")]
    Keybindings(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Failed to export canvas: {0}")]
    Export(String),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
