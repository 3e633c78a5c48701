//! Error types for the editor.
//!
//! Every command failure is recoverable: the session is guaranteed
//! unchanged whenever a command returns an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("DUPLICATE_ID: layer '{0}' already exists")]
    DuplicateId(String),

    #[error("LAYER_NOT_FOUND: no layer '{0}'")]
    LayerNotFound(String),

    #[error("INVALID_DIMENSIONS: layer '{layer_id}' would become {w}x{h}")]
    InvalidDimensions { layer_id: String, w: f64, h: f64 },

    #[error("INVALID_FONT_SIZE: layer '{layer_id}' would get font size {font_size}")]
    InvalidFontSize { layer_id: String, font_size: f64 },

    #[error("INVALID_DOCUMENT: cannot open a session on an invalid document: {0}")]
    InvalidDocument(String),

    #[error("PATCH_MISMATCH: patch field does not apply to a {kind} layer '{layer_id}'")]
    PatchMismatch { layer_id: String, kind: &'static str },
}
