//! # Easel Text Fitting
//!
//! Constraint-based text layout for template boxes: greedy word wrap,
//! shrink-to-fit, line-budgeted fitting with ellipsis truncation, and
//! read-only overflow diagnostics.
//!
//! All algorithms measure glyphs through an injected [`TextMeasurer`], so
//! the same fitting logic works against any renderer and stays
//! deterministic under test.
//!
//! ```rust
//! use easel_textfit::{fit_text, CharCountMeasurer};
//! use easel_document::{Rect, TextStyle, TextAlign, VerticalAlign};
//!
//! let style = TextStyle {
//!     font_family: "Inter".into(),
//!     font_weight: 700,
//!     font_size: 48.0,
//!     line_height: 1.2,
//!     letter_spacing: 0.0,
//!     color: "#111".into(),
//!     align: TextAlign::Left,
//!     valign: VerticalAlign::Top,
//! };
//!
//! let fit = fit_text(
//!     "Summer Sale",
//!     Rect::new(0.0, 0.0, 400.0, 100.0),
//!     &style,
//!     12.0,
//!     &CharCountMeasurer::default(),
//! );
//! assert!(fit.font_size >= 12.0);
//! ```

mod fit;
mod measure;
mod overflow;
mod wrap;

pub use fit::{fit_text, fit_text_on_lines, FitResult};
pub use measure::{CharCountMeasurer, TextMeasurer};
pub use overflow::{detect_overflow, OverflowReport};
pub use wrap::wrap_text;
