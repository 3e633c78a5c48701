//! Overflow diagnostics.
//!
//! Inspect-only: reports whether a text layer's resolved content exceeds its
//! box at the current font size. Never mutates the layer and never proposes
//! a fix; QA tooling decides what to do with the report.

use crate::measure::TextMeasurer;
use crate::wrap::wrap_text;
use easel_document::{resolve_text, Bindings, Layer};
use serde::{Deserialize, Serialize};

/// Result of an overflow check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowReport {
    pub overflows: bool,
    /// Lines the content wraps to at the current font size
    pub measured_lines: usize,
    /// Lines the box (and any `max_lines` constraint) allows
    pub available_lines: usize,
}

impl OverflowReport {
    fn none() -> Self {
        Self {
            overflows: false,
            measured_lines: 0,
            available_lines: 0,
        }
    }
}

/// Check a layer for text overflow at its current, unmodified font size.
///
/// Non-text layers never overflow.
pub fn detect_overflow(
    layer: &Layer,
    bindings: &Bindings,
    measurer: &dyn TextMeasurer,
) -> OverflowReport {
    let Layer::Text {
        common,
        text_style,
        constraints,
        ..
    } = layer
    else {
        return OverflowReport::none();
    };

    let content = resolve_text(layer, bindings);
    let lines = wrap_text(&content, common.rect.w, text_style, measurer);

    let line_height_px = text_style.font_size * text_style.line_height;
    let mut available = if line_height_px > 0.0 {
        (common.rect.h / line_height_px).floor() as usize
    } else {
        0
    };
    if let Some(max_lines) = constraints.as_ref().and_then(|c| c.max_lines) {
        available = available.min(max_lines);
    }

    let too_tall = lines.len() > available;
    let too_wide = lines
        .iter()
        .any(|line| measurer.width(line, text_style) > common.rect.w);

    OverflowReport {
        overflows: too_tall || too_wide,
        measured_lines: lines.len(),
        available_lines: available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::CharCountMeasurer;
    use easel_document::test_fixtures::{shape_layer, text_layer};
    use easel_document::TextConstraints;

    // width == char count × font_size
    fn measurer() -> CharCountMeasurer {
        CharCountMeasurer::new(1.0)
    }

    #[test]
    fn test_fitting_text_reports_no_overflow() {
        // Fixture: rect 400×100, size 48, line_height 1.2 → one 57.6px line
        // fits. A narrow advance keeps "Summer Sale" inside 400px.
        let layer = text_layer("headline", 0);
        let report = detect_overflow(&layer, &Bindings::default(), &CharCountMeasurer::new(0.1));

        assert!(!report.overflows);
        assert_eq!(report.measured_lines, 1);
        assert!(report.available_lines >= 1);
    }

    #[test]
    fn test_long_copy_overflows_line_budget() {
        let mut layer = text_layer("headline", 0);
        if let Layer::Text { text, .. } = &mut layer {
            *text = "word ".repeat(40).trim_end().to_string();
        }

        let report = detect_overflow(&layer, &Bindings::default(), &measurer());
        assert!(report.overflows);
        assert!(report.measured_lines > report.available_lines);
    }

    #[test]
    fn test_max_lines_constraint_tightens_budget() {
        let mut layer = text_layer("headline", 0);
        if let Layer::Text { constraints, .. } = &mut layer {
            *constraints = Some(TextConstraints {
                min_font_size: 8.0,
                max_lines: Some(0),
            });
        }

        let report = detect_overflow(&layer, &Bindings::default(), &measurer());
        assert_eq!(report.available_lines, 0);
        assert!(report.overflows);
    }

    #[test]
    fn test_diagnostic_does_not_mutate_layer() {
        let layer = text_layer("headline", 0);
        let before = layer.clone();
        let _ = detect_overflow(&layer, &Bindings::default(), &measurer());
        assert_eq!(layer, before);
    }

    #[test]
    fn test_non_text_layer_never_overflows() {
        let report = detect_overflow(&shape_layer("bg", 0), &Bindings::default(), &measurer());
        assert!(!report.overflows);
        assert_eq!(report.measured_lines, 0);
    }
}
