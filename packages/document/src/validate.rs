//! Structural validation.
//!
//! Validation collects every problem it can find into a report rather than
//! stopping at the first, and it never panics on malformed input. The
//! report is the whole answer.

use crate::model::{Document, Layer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Stable machine-readable issue codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    InvalidCanvas,
    InvalidDimensions,
    DuplicateId,
    InvalidFontSize,
    OutOfBounds,
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<String>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            layer_id: None,
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            layer_id: None,
        }
    }

    pub fn for_layer(mut self, layer_id: impl Into<String>) -> Self {
        self.layer_id = Some(layer_id.into());
        self
    }
}

/// Result of validating a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        let valid = !errors.iter().any(|i| i.severity == Severity::Error);
        Self { valid, errors }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<String> = self.errors.iter().map(|i| format!("{:?}", i.code)).collect();
        write!(f, "{} issue(s): {}", self.errors.len(), codes.join(", "))
    }
}

/// Validate a document's structural invariants.
///
/// Checks canvas positivity, per-layer rect positivity, id uniqueness, and
/// positive font sizes on text layers.
pub fn validate(document: &Document) -> ValidationReport {
    let mut issues = Vec::new();

    if !(document.canvas.width > 0.0 && document.canvas.height > 0.0) {
        issues.push(ValidationIssue::error(
            IssueCode::InvalidCanvas,
            format!(
                "canvas must have positive dimensions, got {}x{}",
                document.canvas.width, document.canvas.height
            ),
        ));
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();
    for layer in &document.layers {
        if !seen_ids.insert(layer.id()) {
            issues.push(
                ValidationIssue::error(
                    IssueCode::DuplicateId,
                    format!("duplicate layer id '{}'", layer.id()),
                )
                .for_layer(layer.id()),
            );
        }

        let rect = layer.rect();
        if !(rect.w > 0.0 && rect.h > 0.0) {
            issues.push(
                ValidationIssue::error(
                    IssueCode::InvalidDimensions,
                    format!("layer rect must be positive, got {}x{}", rect.w, rect.h),
                )
                .for_layer(layer.id()),
            );
        }

        if let Layer::Text { text_style, .. } = layer {
            if !(text_style.font_size > 0.0) {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::InvalidFontSize,
                        format!("font size must be positive, got {}", text_style.font_size),
                    )
                    .for_layer(layer.id()),
                );
            }
        }
    }

    ValidationReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{image_layer, shape_layer, text_layer, two_layer_document};

    #[test]
    fn test_valid_document_passes() {
        let report = validate(&two_layer_document());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_zero_canvas_is_invalid() {
        let mut doc = two_layer_document();
        doc.canvas.width = 0.0;

        let report = validate(&doc);
        assert!(!report.valid);
        assert_eq!(report.errors[0].code, IssueCode::InvalidCanvas);
    }

    #[test]
    fn test_nonpositive_rect_flagged_for_every_kind() {
        for mut layer in [text_layer("l", 0), image_layer("l", 0), shape_layer("l", 0)] {
            layer.common_mut().rect.w = -10.0;

            let mut doc = two_layer_document();
            doc.layers = vec![layer];

            let report = validate(&doc);
            assert!(!report.valid);
            assert_eq!(report.errors[0].code, IssueCode::InvalidDimensions);
            assert_eq!(report.errors[0].layer_id.as_deref(), Some("l"));
        }
    }

    #[test]
    fn test_duplicate_ids_flagged() {
        let mut doc = two_layer_document();
        doc.layers.push(text_layer("headline", 9));

        let report = validate(&doc);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|i| i.code == IssueCode::DuplicateId));
    }

    #[test]
    fn test_zero_font_size_flagged() {
        let mut doc = two_layer_document();
        if let Layer::Text { text_style, .. } = &mut doc.layers[0] {
            text_style.font_size = 0.0;
        }

        let report = validate(&doc);
        assert!(!report.valid);
        assert!(report
            .errors
            .iter()
            .any(|i| i.code == IssueCode::InvalidFontSize));
    }

    #[test]
    fn test_multiple_issues_collected_in_one_pass() {
        let mut doc = two_layer_document();
        doc.canvas.height = -1.0;
        doc.layers[1].common_mut().rect.h = 0.0;

        let report = validate(&doc);
        assert_eq!(report.errors.len(), 2);
    }
}
