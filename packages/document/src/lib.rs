//! # Easel Document Model
//!
//! The canonical structured description of one ad layout: a canvas, an
//! ordered list of layers (text, image, shape), and the binding tables that
//! make a layout reusable across variants.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: schema + invariants               │
//! │  - Closed layer union, exhaustive matching  │
//! │  - Structural validation (reports, never    │
//! │    panics)                                  │
//! │  - Deterministic paint order                │
//! │  - Binding resolution + variant merge       │
//! └─────────────────────────────────────────────┘
//!          ↑ consumed by textfit / confidence / editor / goldens
//! ```
//!
//! ## Core principles
//!
//! 1. **Value types**: cloning a document yields a fully independent copy;
//!    nothing here aliases shared mutable state.
//! 2. **Total functions**: validation and binding resolution always return,
//!    whatever the input.
//! 3. **JSON is the wire format**: serde shapes match the persisted
//!    `document.json` exactly.

mod bindings;
mod model;
mod validate;
mod variant;

#[cfg(any(test, feature = "fixtures"))]
pub mod test_fixtures;

pub use bindings::{resolve_image_source, resolve_text};
pub use model::{
    Binding, Bindings, Canvas, Document, DocumentMeta, ExtractionMeta, Gradient, ImageAnchor,
    ImageFit, ImageStyle, Layer, LayerCommon, LayerKind, Rect, Shadow, Shape, ShapeKind, Stroke,
    TextAlign, TextConstraints, TextStyle, VerticalAlign,
};
pub use validate::{validate, IssueCode, Severity, ValidationIssue, ValidationReport};
pub use variant::{apply_variant, VariantSpec};

use thiserror::Error;

/// Errors constructing a document from serialized input
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("structurally invalid document: {0}")]
    Invalid(ValidationReport),
}

impl Document {
    /// Parse a document from its JSON wire format, rejecting structurally
    /// invalid input. This is the only sanctioned way to admit untrusted
    /// documents into the engine.
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        let document: Document = serde_json::from_str(source)?;
        let report = validate(&document);
        if !report.valid {
            return Err(DocumentError::Invalid(report));
        }
        Ok(document)
    }

    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
