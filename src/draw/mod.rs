//! Drawing elements and their geometry.
//!
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Element`]: one drawn object per tool, built by [`ElementFactory`]
//! - [`rough`]: seeded hand-drawn sketch geometry for shapes
//! - [`freehand`]: brush outlines
//! - [`hit_test`]: eraser hit detection
//! - `render`: Cairo output (with the `cairo` feature)

pub mod color;
pub mod element;
pub mod font;
pub mod freehand;
#[cfg(feature = "cairo")]
pub mod render;
pub mod rough;
pub mod text;

pub use color::Color;
pub use element::{Element, ElementFactory, ElementStyle, create_element};
pub use font::FontDescriptor;
pub use hit_test::{HitTester, HitThresholds, is_near_element};
pub use text::{ApproxTextMeasure, TextMeasure};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};

#[cfg(feature = "cairo")]
pub use render::{PangoTextMeasure, export_png, render_elements};
