//! Heuristic scoring.
//!
//! Scoring never fails: a layer the heuristics cannot reason about scores 0
//! with an explanatory flag instead of returning an error.

use crate::options::{Aggregation, ScorerOptions, Thresholds};
use crate::report::{ConfidenceReport, Flag, LayerConfidence};
use easel_document::{Document, Layer};

// Deduction weights. The area term is continuous so that shrinking a rect
// always lowers the score, not just once it crosses the "tiny" threshold.
const AREA_WEIGHT: f64 = 0.3;
const UNBOUND_DEDUCTION: f64 = 0.4;
const DISTORTED_DEDUCTION: f64 = 0.2;
const FONT_RANGE_DEDUCTION: f64 = 0.2;

/// Score a single layer against the heuristics in `options`.
///
/// Starts at 1.0 and deducts for: an unbound symbolic role, implausibly
/// small area, extreme aspect ratio, and (text layers) a font size outside
/// the plausible range. The result is clamped to [0, 1].
pub fn score_layer(layer: &Layer, options: &ScorerOptions) -> LayerConfidence {
    let rect = layer.rect();

    if !(rect.x.is_finite() && rect.y.is_finite() && rect.w.is_finite() && rect.h.is_finite()) {
        return LayerConfidence {
            layer_id: layer.id().to_string(),
            score: 0.0,
            flags: vec![Flag::Unscorable],
        };
    }

    let mut score: f64 = 1.0;
    let mut flags = Vec::new();

    if is_unbound(layer) {
        flags.push(Flag::Unbound);
        score -= UNBOUND_DEDUCTION;
    }

    let area = rect.area();
    if area < options.min_area_px {
        flags.push(Flag::Tiny);
    }
    // area / (area + min_area) rises strictly with area, so smaller rects
    // always deduct strictly more.
    score -= AREA_WEIGHT * (1.0 - area / (area + options.min_area_px));

    if rect.aspect_ratio() > options.max_aspect_ratio {
        flags.push(Flag::Distorted);
        score -= DISTORTED_DEDUCTION;
    }

    if let Layer::Text { text_style, .. } = layer {
        let size = text_style.font_size;
        if size < options.min_plausible_font_size || size > options.max_plausible_font_size {
            flags.push(Flag::FontOutOfRange);
            score -= FONT_RANGE_DEDUCTION;
        }
    }

    LayerConfidence {
        layer_id: layer.id().to_string(),
        score: score.clamp(0.0, 1.0),
        flags,
    }
}

fn is_unbound(layer: &Layer) -> bool {
    if layer.common().binding.is_some() {
        return false;
    }
    match layer {
        Layer::Text { text, .. } => text.is_empty(),
        Layer::Image { src, .. } => src.is_empty(),
        // Shapes carry their own fill; they have no symbolic role to bind.
        Layer::Shape { .. } => false,
    }
}

/// Score every layer and aggregate into a template-level report.
pub fn score_template(document: &Document, options: &ScorerOptions) -> ConfidenceReport {
    let layers: Vec<LayerConfidence> = document
        .layers
        .iter()
        .map(|layer| score_layer(layer, options))
        .collect();

    if layers.is_empty() {
        return ConfidenceReport {
            document_id: document.document_id.clone(),
            overall_confidence: 0.0,
            layers,
            flags: vec![Flag::Unscorable],
        };
    }

    let overall = aggregate(document, &layers, options.aggregation);

    let mut flags = Vec::new();
    for layer in &layers {
        for flag in &layer.flags {
            if !flags.contains(flag) {
                flags.push(*flag);
            }
        }
    }

    ConfidenceReport {
        document_id: document.document_id.clone(),
        overall_confidence: overall.clamp(0.0, 1.0),
        layers,
        flags,
    }
}

fn aggregate(document: &Document, layers: &[LayerConfidence], strategy: Aggregation) -> f64 {
    match strategy {
        Aggregation::Mean => {
            layers.iter().map(|l| l.score).sum::<f64>() / layers.len() as f64
        }
        Aggregation::AreaWeighted => {
            let mut weighted = 0.0;
            let mut total_area = 0.0;
            for confidence in layers {
                let area = document
                    .find_layer(&confidence.layer_id)
                    .map(|layer| layer.rect().area())
                    .unwrap_or(0.0);
                weighted += confidence.score * area;
                total_area += area;
            }
            if total_area > 0.0 {
                weighted / total_area
            } else {
                0.0
            }
        }
        Aggregation::Minimum => layers
            .iter()
            .map(|l| l.score)
            .fold(f64::INFINITY, f64::min),
    }
}

/// A template may skip human review when its overall confidence clears the
/// auto threshold and no layer carries an error-severity flag.
pub fn should_auto_approve(report: &ConfidenceReport, thresholds: &Thresholds) -> bool {
    report.overall_confidence >= thresholds.auto && !report.has_error_flag()
}

/// A template needs a human when confidence falls below the review
/// threshold or any layer carries an error-severity flag.
pub fn requires_manual_review(report: &ConfidenceReport, thresholds: &Thresholds) -> bool {
    report.overall_confidence < thresholds.review || report.has_error_flag()
}
