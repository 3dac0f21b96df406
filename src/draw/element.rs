//! Drawing elements and the element factory.

use super::color::Color;
use super::freehand::{self, SmoothPath, StrokeOptions};
use super::rough::{Drawable, RoughGenerator, RoughOptions};
use crate::error::BoardError;
use crate::input::Tool;
use crate::util::{self, Point};
use serde::Serialize;

/// Font size used for text elements created without an explicit size.
pub const DEFAULT_FONT_SIZE: f64 = 32.0;

/// Style captured from the toolbox at pointer-down.
///
/// Absent values stay absent: the factory never substitutes default colors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ElementStyle {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub size: Option<f64>,
}

/// Line, rectangle, circle, ellipse or arrow.
///
/// Coordinates keep the raw drag: `(x1, y1)` is where the pointer went down and
/// `(x2, y2)` where it currently is. For circles `(x1, y1)` is the center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeElement {
    pub id: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub size: Option<f64>,
    /// Sketch geometry derived from the coordinates and `seed = id + 1`.
    #[serde(skip)]
    pub drawable: Drawable,
}

impl ShapeElement {
    pub fn style(&self) -> ElementStyle {
        ElementStyle {
            stroke: self.stroke,
            fill: self.fill,
            size: self.size,
        }
    }
}

/// Freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrushElement {
    pub id: usize,
    /// Pointer samples in order; only ever appended to.
    pub points: Vec<Point>,
    /// Smoothed outline, rebuilt from `points` on every append.
    #[serde(skip)]
    pub path: SmoothPath,
    pub stroke: Option<Color>,
}

/// Text anchored at `(x1, y1)` (top-left).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextElement {
    pub id: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub text: String,
    pub stroke: Option<Color>,
    pub size: Option<f64>,
}

impl TextElement {
    /// Font size in pixels, falling back to [`DEFAULT_FONT_SIZE`].
    pub fn font_size(&self) -> f64 {
        self.size
            .filter(|size| *size > 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }
}

/// One drawn object on the board, one variant per drawing tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Brush(BrushElement),
    Line(ShapeElement),
    Rectangle(ShapeElement),
    Circle(ShapeElement),
    Ellipse(ShapeElement),
    Arrow(ShapeElement),
    Text(TextElement),
}

impl Element {
    pub fn id(&self) -> usize {
        match self {
            Element::Brush(brush) => brush.id,
            Element::Text(text) => text.id,
            Element::Line(shape)
            | Element::Rectangle(shape)
            | Element::Circle(shape)
            | Element::Ellipse(shape)
            | Element::Arrow(shape) => shape.id,
        }
    }

    /// The tool that produced this element.
    pub fn tool(&self) -> Tool {
        match self {
            Element::Brush(_) => Tool::Brush,
            Element::Line(_) => Tool::Line,
            Element::Rectangle(_) => Tool::Rectangle,
            Element::Circle(_) => Tool::Circle,
            Element::Ellipse(_) => Tool::Ellipse,
            Element::Arrow(_) => Tool::Arrow,
            Element::Text(_) => Tool::Text,
        }
    }

    /// Where the element was started (first sample for brushes).
    pub fn anchor(&self) -> Point {
        match self {
            Element::Brush(brush) => brush.points.first().copied().unwrap_or(Point::new(0.0, 0.0)),
            Element::Text(text) => Point::new(text.x1, text.y1),
            Element::Line(shape)
            | Element::Rectangle(shape)
            | Element::Circle(shape)
            | Element::Ellipse(shape)
            | Element::Arrow(shape) => Point::new(shape.x1, shape.y1),
        }
    }

    pub fn stroke(&self) -> Option<Color> {
        match self {
            Element::Brush(brush) => brush.stroke,
            Element::Text(text) => text.stroke,
            Element::Line(shape)
            | Element::Rectangle(shape)
            | Element::Circle(shape)
            | Element::Ellipse(shape)
            | Element::Arrow(shape) => shape.stroke,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeElement> {
        match self {
            Element::Line(shape)
            | Element::Rectangle(shape)
            | Element::Circle(shape)
            | Element::Ellipse(shape)
            | Element::Arrow(shape) => Some(shape),
            Element::Brush(_) | Element::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_brush(&self) -> Option<&BrushElement> {
        match self {
            Element::Brush(brush) => Some(brush),
            _ => None,
        }
    }
}

/// Builds elements from a tool, drag geometry and style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementFactory {
    /// Arrowhead barb length in pixels.
    pub arrow_length: f64,
    /// Outline parameters for brush strokes.
    pub brush: StrokeOptions,
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self {
            arrow_length: util::ARROW_LENGTH,
            brush: StrokeOptions::default(),
        }
    }
}

impl ElementFactory {
    pub fn new(arrow_length: f64) -> Self {
        Self {
            arrow_length,
            ..Self::default()
        }
    }

    /// Creates the element for `tool` spanning `(x1, y1)` → `(x2, y2)`.
    ///
    /// Identical arguments always produce identical elements, including the
    /// sketch jitter (seeded with `id + 1`).
    ///
    /// # Errors
    /// [`BoardError::UnsupportedTool`] for tools without an element
    /// representation (the eraser).
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &self,
        id: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        tool: Tool,
        style: &ElementStyle,
    ) -> Result<Element, BoardError> {
        let shape = |drawable: Drawable| ShapeElement {
            id,
            x1,
            y1,
            x2,
            y2,
            stroke: style.stroke,
            fill: style.fill,
            size: style.size,
            drawable,
        };

        let element = match tool {
            Tool::Brush => {
                let points = vec![Point::new(x1, y1)];
                let path = freehand::smooth_path(&points, &self.brush);
                Element::Brush(BrushElement {
                    id,
                    points,
                    path,
                    stroke: style.stroke,
                })
            }
            Tool::Line => {
                let options = rough_options(id, style);
                let drawable = RoughGenerator::for_options(&options).line(x1, y1, x2, y2, &options);
                Element::Line(shape(drawable))
            }
            Tool::Rectangle => {
                let options = rough_options(id, style);
                let drawable = RoughGenerator::for_options(&options).rectangle(
                    x1,
                    y1,
                    x2 - x1,
                    y2 - y1,
                    &options,
                );
                Element::Rectangle(shape(drawable))
            }
            Tool::Circle => {
                let options = rough_options(id, style);
                // The generator takes a diameter; twice the drag distance is passed through unchanged.
                let diameter = 2.0 * util::distance(x1, y1, x2, y2);
                let drawable = RoughGenerator::for_options(&options).circle(x1, y1, diameter, &options);
                Element::Circle(shape(drawable))
            }
            Tool::Ellipse => {
                let options = rough_options(id, style);
                let cx = (x1 + x2) / 2.0;
                let cy = (y1 + y2) / 2.0;
                let drawable = RoughGenerator::for_options(&options).ellipse(
                    cx,
                    cy,
                    x2 - x1,
                    y2 - y1,
                    &options,
                );
                Element::Ellipse(shape(drawable))
            }
            Tool::Arrow => {
                let options = rough_options(id, style);
                let [(x3, y3), (x4, y4)] =
                    util::arrow_head_coordinates(x1, y1, x2, y2, self.arrow_length);
                let points = [
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    Point::new(x3, y3),
                    Point::new(x2, y2),
                    Point::new(x4, y4),
                ];
                let drawable = RoughGenerator::for_options(&options).linear_path(&points, &options);
                Element::Arrow(shape(drawable))
            }
            Tool::Text => Element::Text(TextElement {
                id,
                x1,
                y1,
                x2,
                y2,
                text: String::new(),
                stroke: style.stroke,
                size: style.size,
            }),
            Tool::Eraser => return Err(BoardError::UnsupportedTool(tool)),
        };

        Ok(element)
    }

    /// Rebuilds a shape with a new far endpoint, keeping its id, origin and style.
    pub fn rebuild_shape(
        &self,
        tool: Tool,
        shape: &ShapeElement,
        x2: f64,
        y2: f64,
    ) -> Result<Element, BoardError> {
        self.create(shape.id, shape.x1, shape.y1, x2, y2, tool, &shape.style())
    }

    /// Appends a sample to a brush stroke and recomputes its outline.
    pub fn extend_brush(&self, brush: &mut BrushElement, x: f64, y: f64) {
        brush.points.push(Point::new(x, y));
        brush.path = freehand::smooth_path(&brush.points, &self.brush);
    }
}

/// [`ElementFactory::create`] with default factory settings.
pub fn create_element(
    id: usize,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    tool: Tool,
    style: &ElementStyle,
) -> Result<Element, BoardError> {
    ElementFactory::default().create(id, x1, y1, x2, y2, tool, style)
}

/// Generator options for element `id`; style values are only forwarded when set.
fn rough_options(id: usize, style: &ElementStyle) -> RoughOptions {
    let mut options = RoughOptions {
        seed: id as u64 + 1,
        ..RoughOptions::default()
    };
    if let Some(stroke) = style.stroke {
        options.stroke = Some(stroke);
    }
    if let Some(fill) = style.fill {
        options.fill = Some(fill);
    }
    if let Some(size) = style.size.filter(|size| *size > 0.0) {
        options.stroke_width = size;
    }
    options
}
