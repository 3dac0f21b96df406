//! Text measurement used by the hit-test engine.

use super::font::FontDescriptor;

/// Measures the rendered width of a string.
///
/// Hit-testing a text element needs the same extent the presenter draws, so the
/// board holds one measurer and uses it for every text element.
pub trait TextMeasure {
    /// Width in pixels of `text` drawn at `size` px with `font`.
    fn text_width(&self, text: &str, size: f64, font: &FontDescriptor) -> f64;
}

/// Font-independent estimate: longest line × size × average glyph width.
///
/// Used when no real font backend is available (headless builds, tests).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMeasure {
    /// Average advance of one glyph as a fraction of the font size (em).
    pub average_glyph_width: f64,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self {
            average_glyph_width: 0.5,
        }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str, size: f64, _font: &FontDescriptor) -> f64 {
        let longest = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        longest as f64 * size * self.average_glyph_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_width_scales_with_size_and_longest_line() {
        let measure = ApproxTextMeasure::default();
        let font = FontDescriptor::default();
        assert_eq!(measure.text_width("", 32.0, &font), 0.0);
        assert_eq!(measure.text_width("hi", 20.0, &font), 20.0);
        assert_eq!(measure.text_width("a\nlonger", 10.0, &font), 30.0);
    }
}
