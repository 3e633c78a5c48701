//! Scorer configuration.
//!
//! Every tunable the scorer consults is explicit here; nothing is read from
//! process-wide state.

use serde::{Deserialize, Serialize};

/// Configuration for layer and template scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorerOptions {
    /// Rects smaller than this area (px²) look like extraction noise
    pub min_area_px: f64,

    /// Width:height (or height:width) ratios above this look distorted
    pub max_aspect_ratio: f64,

    /// Plausible font size range for extracted text, px (inclusive)
    pub min_plausible_font_size: f64,
    pub max_plausible_font_size: f64,

    /// How per-layer scores combine into the template score
    pub aggregation: Aggregation,
}

impl Default for ScorerOptions {
    fn default() -> Self {
        Self {
            min_area_px: 64.0,
            max_aspect_ratio: 25.0,
            min_plausible_font_size: 6.0,
            max_plausible_font_size: 200.0,
            aggregation: Aggregation::Mean,
        }
    }
}

impl ScorerOptions {
    /// Tighter bounds for pipelines that prefer flagging over trusting
    pub fn strict() -> Self {
        Self {
            min_area_px: 256.0,
            max_aspect_ratio: 12.0,
            min_plausible_font_size: 8.0,
            max_plausible_font_size: 160.0,
            ..Default::default()
        }
    }

    /// Looser bounds for hand-authored documents
    pub fn lenient() -> Self {
        Self {
            min_area_px: 16.0,
            max_aspect_ratio: 50.0,
            min_plausible_font_size: 4.0,
            max_plausible_font_size: 400.0,
            ..Default::default()
        }
    }
}

/// Strategy for combining per-layer scores into an overall score.
///
/// The default is the unweighted arithmetic mean of all layer scores. Every
/// strategy preserves the monotonicity contract: lowering one layer's score
/// never raises the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Aggregation {
    #[default]
    Mean,
    AreaWeighted,
    Minimum,
}

/// Review gating thresholds. Passed explicitly by callers; the defaults are
/// configuration, not behavior baked into the scoring functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// At or above this overall confidence a template may skip review
    pub auto: f64,
    /// Below this overall confidence a template always needs review
    pub review: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            auto: 0.85,
            review: 0.6,
        }
    }
}
