//! Glyph measurement seam.
//!
//! Fitting never assumes a font-metrics backend. Callers inject a
//! [`TextMeasurer`]; a renderer-backed implementation gives production
//! metrics, while [`CharCountMeasurer`] gives deterministic ones for tests
//! and diagnostics.

use easel_document::TextStyle;

/// Measures the rendered width of a text run under a style.
pub trait TextMeasurer {
    /// Width in px of `text` rendered with `style` (including
    /// `style.letter_spacing` between glyphs, if the backend models it).
    fn width(&self, text: &str, style: &TextStyle) -> f64;
}

/// Deterministic measurer: every glyph advances by a fixed fraction of the
/// font size. Not typographically accurate, but stable across platforms,
/// which is what layout tests need.
#[derive(Debug, Clone, Copy)]
pub struct CharCountMeasurer {
    /// Advance per glyph as a fraction of the font size
    pub advance: f64,
}

impl CharCountMeasurer {
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for CharCountMeasurer {
    fn default() -> Self {
        // Roughly the advance of a medium-width glyph in most UI fonts.
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for CharCountMeasurer {
    fn width(&self, text: &str, style: &TextStyle) -> f64 {
        let glyphs = text.chars().count() as f64;
        let gaps = (glyphs - 1.0).max(0.0);
        glyphs * self.advance * style.font_size + gaps * style.letter_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(font_size: f64) -> TextStyle {
        TextStyle {
            font_family: "Inter".to_string(),
            font_weight: 400,
            font_size,
            line_height: 1.2,
            letter_spacing: 0.0,
            color: "#000".to_string(),
            align: Default::default(),
            valign: Default::default(),
        }
    }

    #[test]
    fn test_width_scales_with_font_size() {
        let measurer = CharCountMeasurer::new(0.5);
        let narrow = measurer.width("hello", &style(10.0));
        let wide = measurer.width("hello", &style(20.0));
        assert!((wide - narrow * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_has_zero_width() {
        let measurer = CharCountMeasurer::default();
        assert_eq!(measurer.width("", &style(16.0)), 0.0);
    }
}
