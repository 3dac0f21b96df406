//! Cairo-based rendering of board elements.
//!
//! Only compiled with the `cairo` feature. The board itself never draws; a
//! presenter calls [`render_elements`] with the current element list after
//! every state change.

use super::color::{BLACK, Color, WHITE};
use super::element::{BrushElement, Element, ShapeElement, TextElement};
use super::font::FontDescriptor;
use super::freehand::PathCommand;
use super::rough::OpSet;
use super::text::TextMeasure;
use crate::error::BoardError;
use log::info;
use std::fs::File;
use std::path::Path;

/// Clears the canvas to `background` and draws every element in order.
///
/// The first element ends up on the bottom layer.
pub fn render_elements(
    ctx: &cairo::Context,
    elements: &[Element],
    font: &FontDescriptor,
    background: Color,
) {
    clear(ctx, background);
    for element in elements {
        render_element(ctx, element, font);
    }
}

/// Paints the whole surface with `background`.
pub fn clear(ctx: &cairo::Context, background: Color) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let _ = ctx.paint();
    ctx.restore().ok();
}

/// Draws a single element, dispatching on its variant.
pub fn render_element(ctx: &cairo::Context, element: &Element, font: &FontDescriptor) {
    match element {
        Element::Line(shape)
        | Element::Rectangle(shape)
        | Element::Circle(shape)
        | Element::Ellipse(shape)
        | Element::Arrow(shape) => render_sketch(ctx, shape),
        Element::Brush(brush) => render_brush(ctx, brush),
        Element::Text(text) => render_text(ctx, text, font),
    }
}

/// Fill polygons first, then every stroke polyline.
fn render_sketch(ctx: &cairo::Context, shape: &ShapeElement) {
    let options = &shape.drawable.options;

    if let Some(fill) = options.fill {
        set_color(ctx, fill);
        for set in shape.drawable.fill_sets() {
            trace_polyline(ctx, set);
            ctx.close_path();
            let _ = ctx.fill();
        }
    }

    set_color(ctx, options.stroke.unwrap_or(BLACK));
    ctx.set_line_width(options.stroke_width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    for set in shape.drawable.stroke_sets() {
        trace_polyline(ctx, set);
        let _ = ctx.stroke();
    }
}

fn trace_polyline(ctx: &cairo::Context, set: &OpSet) {
    let Some((first, rest)) = set.points.split_first() else {
        return;
    };
    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
}

/// Brush strokes are filled outlines, painted in the stroke color.
fn render_brush(ctx: &cairo::Context, brush: &BrushElement) {
    if brush.path.is_empty() {
        return;
    }

    set_color(ctx, brush.stroke.unwrap_or(BLACK));
    ctx.new_path();

    let mut current = (0.0, 0.0);
    for command in &brush.path.commands {
        match *command {
            PathCommand::MoveTo { to } => {
                ctx.move_to(to.x, to.y);
                current = (to.x, to.y);
            }
            PathCommand::QuadTo { control, to } => {
                // Cairo only has cubics; elevate the quadratic.
                let c1 = (
                    current.0 + 2.0 / 3.0 * (control.x - current.0),
                    current.1 + 2.0 / 3.0 * (control.y - current.1),
                );
                let c2 = (
                    to.x + 2.0 / 3.0 * (control.x - to.x),
                    to.y + 2.0 / 3.0 * (control.y - to.y),
                );
                ctx.curve_to(c1.0, c1.1, c2.0, c2.1, to.x, to.y);
                current = (to.x, to.y);
            }
            PathCommand::Close => ctx.close_path(),
        }
    }

    ctx.set_fill_rule(cairo::FillRule::Winding);
    let _ = ctx.fill();
}

/// Text is anchored by the top-left corner of its first line.
fn render_text(ctx: &cairo::Context, text: &TextElement, font: &FontDescriptor) {
    if text.text.is_empty() {
        return;
    }

    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(text.font_size()));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(&text.text);

    set_color(ctx, text.stroke.unwrap_or(BLACK));
    ctx.move_to(text.x1, text.y1);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

fn set_color(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Renders `elements` onto a white `width`×`height` canvas and writes it as PNG.
pub fn export_png(
    elements: &[Element],
    width: i32,
    height: i32,
    font: &FontDescriptor,
    path: &Path,
) -> Result<(), BoardError> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .map_err(|err| BoardError::Render(err.to_string()))?;
    {
        let ctx =
            cairo::Context::new(&surface).map_err(|err| BoardError::Render(err.to_string()))?;
        render_elements(&ctx, elements, font, WHITE);
    }
    surface.flush();

    let mut file = File::create(path)?;
    surface
        .write_to_png(&mut file)
        .map_err(|err| BoardError::Export(err.to_string()))?;

    info!(
        "Exported {} element(s) to {} ({}x{})",
        elements.len(),
        path.display(),
        width,
        height
    );
    Ok(())
}

/// Measures text with Pango so erase boxes match the rendered glyphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PangoTextMeasure;

impl TextMeasure for PangoTextMeasure {
    fn text_width(&self, text: &str, size: f64, font: &FontDescriptor) -> f64 {
        if text.is_empty() {
            return 0.0;
        }

        // A 1x1 surface is enough; only the layout is needed.
        let Ok(surface) = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1) else {
            return 0.0;
        };
        let Ok(ctx) = cairo::Context::new(&surface) else {
            return 0.0;
        };

        let layout = pangocairo::functions::create_layout(&ctx);
        let font_desc = pango::FontDescription::from_string(&font.to_pango_string(size));
        layout.set_font_description(Some(&font_desc));
        layout.set_text(text);

        let (_ink_rect, logical_rect) = layout.extents();
        logical_rect.width() as f64 / pango::SCALE as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::element::{ElementFactory, ElementStyle};
    use crate::input::Tool;

    fn surface_has_dark_pixels(surface: &mut cairo::ImageSurface) -> bool {
        surface
            .data()
            .map(|data| data.chunks(4).any(|px| px[0] < 128 && px[3] > 0))
            .unwrap_or(false)
    }

    #[test]
    fn render_draws_every_variant() {
        let factory = ElementFactory::default();
        let style = ElementStyle {
            stroke: Some(BLACK),
            size: Some(2.0),
            ..ElementStyle::default()
        };
        let font = FontDescriptor::default();

        for tool in Tool::ALL.into_iter().filter(|tool| tool.creates_elements()) {
            let mut element = factory
                .create(0, 10.0, 10.0, 60.0, 40.0, tool, &style)
                .unwrap();
            if let Element::Text(text) = &mut element {
                text.text = "Hi".into();
            }

            let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 100).unwrap();
            {
                let ctx = cairo::Context::new(&surface).unwrap();
                render_elements(&ctx, &[element], &font, WHITE);
            }
            surface.flush();
            assert!(surface_has_dark_pixels(&mut surface), "{tool:?} drew nothing");
        }
    }

    #[test]
    fn export_writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.png");
        export_png(&[], 20, 10, &FontDescriptor::default(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn pango_width_grows_with_text() {
        let font = FontDescriptor::new("Sans".into(), "normal".into(), "normal".into());
        let short = PangoTextMeasure.text_width("a", 20.0, &font);
        let long = PangoTextMeasure.text_width("aaaaaaaa", 20.0, &font);
        assert_eq!(PangoTextMeasure.text_width("", 20.0, &font), 0.0);
        assert!(long > short);
    }
}
