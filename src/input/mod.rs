//! Input handling and the board state machine.
//!
//! This module turns pointer, keyboard and toolbar events into board
//! transitions. It holds the active tool, the per-tool styles and the
//! history-tracked element list.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;
pub mod toolbox;

// Re-export commonly used types at module level
pub use events::{BoardEvent, Key};
pub use modifiers::Modifiers;
pub use state::{BoardState, History, Phase, TextBox};
pub use tool::Tool;
pub use toolbox::Toolbox;
