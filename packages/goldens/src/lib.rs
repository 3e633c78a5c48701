//! # Easel Goldens
//!
//! Golden-image regression harness. Rendering itself is an external
//! collaborator: every entry point takes an injected async renderer
//! (`(Document, Bindings) -> RgbaImage`) and never performs I/O, decoding,
//! or encoding of its own.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ compare:     reference vs render, per-channel │
//! │              tolerance + diff map             │
//! │ geometry:    rects vs canvas, no rendering    │
//! │ determinism: render twice, buffers must match │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The harness imposes no retry, timeout, or cancellation policy on the
//! renderer; callers own that.

mod compare;
mod determinism;
mod geometry;

pub use compare::{compare_images, render_and_compare, CompareResult, DiffThresholds};
pub use determinism::{render_determinism, DeterminismReport};
pub use geometry::{layer_geometry, GeometryReport, GeometryViolation};

use thiserror::Error;

/// Structural failures of the harness itself, as opposed to a comparison
/// that ran and failed its thresholds.
#[derive(Error, Debug)]
pub enum GoldenError {
    #[error(
        "image size mismatch: reference {expected_w}x{expected_h}, rendered {actual_w}x{actual_h}"
    )]
    SizeMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error("renderer failed: {0}")]
    Render(String),
}
