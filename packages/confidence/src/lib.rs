//! # Easel Confidence Scorer
//!
//! Heuristic [0, 1] trust estimates for extracted template layers, used to
//! gate human review: documents the heuristics trust can skip the review
//! queue, everything else lands in front of a person.
//!
//! Scoring is total: unscorable input yields a zero score with an
//! explanatory flag, never an error. Every tunable (area and aspect
//! bounds, font range, aggregation strategy, review thresholds) is explicit
//! configuration.
//!
//! ```rust
//! use easel_confidence::{score_template, should_auto_approve, ScorerOptions, Thresholds};
//! use easel_document::test_fixtures::two_layer_document;
//!
//! let report = score_template(&two_layer_document(), &ScorerOptions::default());
//! if should_auto_approve(&report, &Thresholds::default()) {
//!     // skip the review queue
//! }
//! ```

mod options;
mod report;
mod scorer;

pub use options::{Aggregation, ScorerOptions, Thresholds};
pub use report::{ConfidenceReport, Flag, FlagSeverity, LayerConfidence};
pub use scorer::{requires_manual_review, score_layer, score_template, should_auto_approve};
