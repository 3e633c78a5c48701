//! Shrink-to-fit.
//!
//! Both fitting entry points run the same shrink loop: try the styled font
//! size, wrap, test the constraint, step down, stop at the configured
//! minimum. Exhausting the range is not an error: the minimum size comes
//! back with the residual overflow intact and the caller decides policy.

use crate::measure::TextMeasurer;
use crate::wrap::wrap_text;
use easel_document::{Rect, TextStyle};
use serde::{Deserialize, Serialize};

/// Font-size decrement per shrink iteration, in px.
const SHRINK_STEP: f64 = 1.0;

const ELLIPSIS: char = '…';

/// Outcome of a fitting pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    pub font_size: f64,
    pub lines: Vec<String>,
}

/// Shrink `style.font_size` until the wrapped block fits `rect`, both in
/// height (`lines × size × line_height ≤ rect.h`) and in width (every
/// measured line ≤ `rect.w`). Stops at `min_font_size` inclusive; if no
/// size in range fits, returns the minimum with the overflow remaining.
pub fn fit_text(
    text: &str,
    rect: Rect,
    style: &TextStyle,
    min_font_size: f64,
    measurer: &dyn TextMeasurer,
) -> FitResult {
    let mut last = None;

    for size in candidate_sizes(style.font_size, min_font_size) {
        let sized = style_at(style, size);
        let lines = wrap_text(text, rect.w, &sized, measurer);

        let block_height = lines.len() as f64 * size * sized.line_height;
        let widest = widest_line(&lines, &sized, measurer);

        if block_height <= rect.h && widest <= rect.w {
            return FitResult { font_size: size, lines };
        }
        last = Some(FitResult { font_size: size, lines });
    }

    last.unwrap_or_else(|| FitResult {
        font_size: style.font_size,
        lines: wrap_text(text, rect.w, style, measurer),
    })
}

/// Same shrink loop bounded by a line budget instead of box height. If the
/// text still needs more than `max_lines` at the minimum size, the block is
/// truncated: the first `max_lines - 1` wrapped lines stay intact and the
/// last line is cut at the nearest word boundary with an ellipsis appended.
/// A mid-word cut happens only when not even one word fits.
pub fn fit_text_on_lines(
    text: &str,
    rect: Rect,
    style: &TextStyle,
    max_lines: usize,
    min_font_size: f64,
    measurer: &dyn TextMeasurer,
) -> FitResult {
    if max_lines == 0 {
        return FitResult {
            font_size: min_font_size,
            lines: Vec::new(),
        };
    }

    let mut last_size = style.font_size;
    for size in candidate_sizes(style.font_size, min_font_size) {
        let sized = style_at(style, size);
        let lines = wrap_text(text, rect.w, &sized, measurer);

        if lines.len() <= max_lines && widest_line(&lines, &sized, measurer) <= rect.w {
            return FitResult { font_size: size, lines };
        }
        last_size = size;
    }

    // Still overflowing at the minimum: truncate.
    let sized = style_at(style, last_size);
    let wrapped = wrap_text(text, rect.w, &sized, measurer);
    let lines = truncate_to_budget(&wrapped, max_lines, rect.w, &sized, measurer);

    FitResult {
        font_size: last_size,
        lines,
    }
}

/// Sizes from `start` down to `min` inclusive. When `start` is already at
/// or below the minimum the only candidate is `start` itself.
fn candidate_sizes(start: f64, min: f64) -> Vec<f64> {
    if start <= min {
        return vec![start];
    }

    let mut sizes = Vec::new();
    let mut size = start;
    while size > min {
        sizes.push(size);
        size -= SHRINK_STEP;
    }
    sizes.push(min);
    sizes
}

fn style_at(style: &TextStyle, font_size: f64) -> TextStyle {
    TextStyle {
        font_size,
        ..style.clone()
    }
}

fn widest_line(lines: &[String], style: &TextStyle, measurer: &dyn TextMeasurer) -> f64 {
    lines
        .iter()
        .map(|line| measurer.width(line, style))
        .fold(0.0, f64::max)
}

fn truncate_to_budget(
    wrapped: &[String],
    max_lines: usize,
    max_width: f64,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    // Reached only when the block still overflows at the minimum size, by
    // line count or by an unbreakable word exceeding the width.
    let intact = max_lines.min(wrapped.len()).saturating_sub(1);
    let mut lines: Vec<String> = wrapped[..intact].to_vec();

    // Everything that did not make the intact lines competes for the last one.
    let remainder = wrapped[intact..].join(" ");
    lines.push(truncate_line(&remainder, max_width, style, measurer));
    lines
}

fn truncate_line(
    text: &str,
    max_width: f64,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut kept = String::new();
    for word in &words {
        let candidate = if kept.is_empty() {
            format!("{word}{ELLIPSIS}")
        } else {
            format!("{kept} {word}{ELLIPSIS}")
        };

        if measurer.width(&candidate, style) <= max_width {
            kept = if kept.is_empty() {
                (*word).to_string()
            } else {
                format!("{kept} {word}")
            };
        } else {
            break;
        }
    }

    if kept.is_empty() {
        // No word boundary fits; cut the first word by glyphs.
        let first = words.first().copied().unwrap_or("");
        let mut partial = String::new();
        for ch in first.chars() {
            let candidate = format!("{partial}{ch}{ELLIPSIS}");
            if measurer.width(&candidate, style) <= max_width {
                partial.push(ch);
            } else {
                break;
            }
        }
        kept = partial;
    }

    format!("{kept}{ELLIPSIS}")
}
