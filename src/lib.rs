//! Hand-drawn style drawing board.
//!
//! The core is the element model plus the history-tracked state machine:
//! tool selection, element creation and mutation, eraser hit-testing and
//! undo/redo. Rendering is an external observer (see `draw::render` with the
//! `cairo` feature).

pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use draw::{Element, ElementFactory, ElementStyle, create_element, is_near_element};
pub use error::BoardError;
pub use input::{BoardEvent, BoardState, Modifiers, Phase, Tool, Toolbox};
