mod actions;
mod core;
mod history;
mod pointer;

pub use self::core::{BoardState, Phase, TextBox};
pub use history::History;
