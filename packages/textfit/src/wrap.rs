//! Greedy word wrap.

use crate::measure::TextMeasurer;
use easel_document::TextStyle;

/// Wrap `text` into lines no wider than `max_width` px.
///
/// Greedy: each line takes as many whole words as fit. A single word wider
/// than `max_width` occupies its own line unsplit; ad copy never breaks
/// mid-word. Explicit newlines in the input force a break.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, max_width, style, measurer, &mut lines);
    }

    lines
}

fn wrap_paragraph(
    paragraph: &str,
    max_width: f64,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
    lines: &mut Vec<String>,
) {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.is_empty() {
        lines.push(String::new());
        return;
    }

    let mut current = String::new();
    for word in words {
        if current.is_empty() {
            // First word on the line always lands, however wide.
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measurer.width(&candidate, style) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::CharCountMeasurer;

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

    // advance 1.0 at font_size 1.0 → width == char count
    fn measurer() -> CharCountMeasurer {
        CharCountMeasurer::new(1.0)
    }

    #[test]
    fn test_text_that_fits_stays_on_one_line() {
        let lines = wrap_text("buy now", 10.0, &style(1.0), &measurer());
        assert_eq!(lines, vec!["buy now"]);
    }

    #[test]
    fn test_greedy_wrap_packs_words() {
        let lines = wrap_text("one two three four", 9.0, &style(1.0), &measurer());
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_never_splits_a_word() {
        let lines = wrap_text("hi unbreakableword hi", 6.0, &style(1.0), &measurer());
        assert_eq!(lines, vec!["hi", "unbreakableword", "hi"]);

        for line in &lines {
            assert!(!line.contains('-'));
        }
    }

    #[test]
    fn test_single_oversized_word_gets_own_line() {
        let lines = wrap_text("supercalifragilistic", 5.0, &style(1.0), &measurer());
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_explicit_newlines_force_breaks() {
        let lines = wrap_text("top\nbottom", 100.0, &style(1.0), &measurer());
        assert_eq!(lines, vec!["top", "bottom"]);
    }

    #[test]
    fn test_empty_input_wraps_to_single_empty_line() {
        let lines = wrap_text("", 10.0, &style(1.0), &measurer());
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_collapses_runs_of_spaces() {
        let lines = wrap_text("a    b", 10.0, &style(1.0), &measurer());
        assert_eq!(lines, vec!["a b"]);
    }
}
