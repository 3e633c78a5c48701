//! Geometric assertions that need no renderer at all.

use easel_document::{Document, Rect};
use serde::{Deserialize, Serialize};

/// One layer whose rect escapes the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryViolation {
    pub layer_id: String,
    pub rect: Rect,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryReport {
    pub passed: bool,
    pub violations: Vec<GeometryViolation>,
}

/// Check every layer's rect against the canvas bounds, `tolerance` pixels
/// of overhang allowed on each edge. Catches the common extraction failure
/// mode where a layer lands far off-canvas, without rendering a single
/// pixel.
pub fn layer_geometry(document: &Document, tolerance: f64) -> GeometryReport {
    let canvas = &document.canvas;
    let mut violations = Vec::new();

    for layer in &document.layers {
        let rect = layer.rect();

        if !(rect.x.is_finite() && rect.y.is_finite() && rect.w.is_finite() && rect.h.is_finite()) {
            violations.push(GeometryViolation {
                layer_id: layer.id().to_string(),
                rect,
                message: "rect has non-finite coordinates".to_string(),
            });
            continue;
        }

        let out = rect.x < -tolerance
            || rect.y < -tolerance
            || rect.x + rect.w > canvas.width + tolerance
            || rect.y + rect.h > canvas.height + tolerance;
        if out {
            violations.push(GeometryViolation {
                layer_id: layer.id().to_string(),
                rect,
                message: format!(
                    "rect ({}, {}, {}x{}) escapes the {}x{} canvas",
                    rect.x, rect.y, rect.w, rect.h, canvas.width, canvas.height
                ),
            });
        }
    }

    GeometryReport {
        passed: violations.is_empty(),
        violations,
    }
}
