//! # Edit Session
//!
//! One human's correction pass over one document.
//!
//! The session owns two independent copies: `original`, a frozen snapshot
//! taken at open time, and `current`, which every command mutates. All
//! mutation goes through the command API; each committed command is
//! recorded as a reversible [`EditOperation`] on the undo stack.
//!
//! ## Command semantics
//!
//! - Commands are atomic: validate first, mutate only if valid. A rejected
//!   command leaves the session exactly as it was
//! - Any new mutating command issued while the redo stack is non-empty
//!   clears it (diverging-timeline semantics)
//! - `export()` returns a deep clone disconnected from later mutation

use crate::diff::{diff_documents, SessionDiff};
use crate::errors::EditError;
use crate::operations::{apply_patch, EditOpKind, EditOperation, LayerPatch, LayerSnapshot};
use easel_confidence::{score_template, ConfidenceReport, ScorerOptions};
use easel_document::{
    validate, Document, IssueCode, Layer, ValidationIssue, ValidationReport,
};
use easel_textfit::{detect_overflow, OverflowReport, TextMeasurer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Session tunables. Explicit configuration, never process-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    /// How far (px) a rect may exceed the canvas before it is warned about
    pub out_of_bounds_tolerance: f64,
    /// Maximum undo depth; 0 = unlimited
    pub max_history: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            out_of_bounds_tolerance: 1.0,
            max_history: 100,
        }
    }
}

/// Session-level validation: document errors plus editor-only warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionValidation {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// An in-progress Human-in-the-Loop edit over one document
#[derive(Debug)]
pub struct EditSession {
    pub session_id: String,
    pub document_id: String,
    original: Document,
    current: Document,
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    options: SessionOptions,
}

impl EditSession {
    /// Open a session against a snapshot of `document`.
    ///
    /// Fails with `INVALID_DOCUMENT` rather than producing a session whose
    /// commands would misbehave on broken structure.
    pub fn new(session_id: impl Into<String>, document: Document) -> Result<Self, EditError> {
        Self::with_options(session_id, document, SessionOptions::default())
    }

    pub fn with_options(
        session_id: impl Into<String>,
        document: Document,
        options: SessionOptions,
    ) -> Result<Self, EditError> {
        let report = validate(&document);
        if !report.valid {
            return Err(EditError::InvalidDocument(report.to_string()));
        }

        Ok(Self {
            session_id: session_id.into(),
            document_id: document.document_id.clone(),
            original: document.clone(),
            current: document,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            options,
        })
    }

    // --- Commands ---

    /// Insert a new layer at the end of the layer list.
    pub fn create_layer(&mut self, layer: Layer) -> Result<(), EditError> {
        if self.current.find_layer(layer.id()).is_some() {
            return Err(EditError::DuplicateId(layer.id().to_string()));
        }
        let rect = layer.rect();
        if !(rect.w > 0.0 && rect.h > 0.0) {
            return Err(EditError::InvalidDimensions {
                layer_id: layer.id().to_string(),
                w: rect.w,
                h: rect.h,
            });
        }
        if let Layer::Text { text_style, .. } = &layer {
            if !(text_style.font_size > 0.0) {
                return Err(EditError::InvalidFontSize {
                    layer_id: layer.id().to_string(),
                    font_size: text_style.font_size,
                });
            }
        }

        let index = self.current.layers.len();
        self.current.layers.push(layer.clone());
        self.commit(EditOperation::create(layer, index));
        Ok(())
    }

    /// Merge a partial patch into an existing layer.
    pub fn update_layer(&mut self, layer_id: &str, patch: &LayerPatch) -> Result<(), EditError> {
        let index = self
            .current
            .layer_index(layer_id)
            .ok_or_else(|| EditError::LayerNotFound(layer_id.to_string()))?;

        let before = self.current.layers[index].clone();
        let after = apply_patch(&before, patch)?;

        self.current.layers[index] = after.clone();
        self.commit(EditOperation::update(
            LayerSnapshot { layer: before, index },
            LayerSnapshot { layer: after, index },
        ));
        Ok(())
    }

    /// Remove a layer, remembering its position for undo.
    pub fn delete_layer(&mut self, layer_id: &str) -> Result<(), EditError> {
        let index = self
            .current
            .layer_index(layer_id)
            .ok_or_else(|| EditError::LayerNotFound(layer_id.to_string()))?;

        let layer = self.current.layers.remove(index);
        self.commit(EditOperation::delete(LayerSnapshot { layer, index }));
        Ok(())
    }

    /// Change only a layer's paint order.
    pub fn reorder_layer(&mut self, layer_id: &str, new_z: i32) -> Result<(), EditError> {
        let index = self
            .current
            .layer_index(layer_id)
            .ok_or_else(|| EditError::LayerNotFound(layer_id.to_string()))?;

        let before = self.current.layers[index].clone();
        let mut after = before.clone();
        after.common_mut().z = new_z;

        self.current.layers[index] = after.clone();
        self.commit(EditOperation::reorder(
            LayerSnapshot { layer: before, index },
            LayerSnapshot { layer: after, index },
        ));
        Ok(())
    }

    fn commit(&mut self, op: EditOperation) {
        debug!(
            session = %self.session_id,
            layer = %op.layer_id,
            kind = ?op.kind,
            "commit"
        );

        // Committing while a redo is possible forks the timeline; the old
        // future is unreachable from here.
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
        }

        self.undo_stack.push(op);
        if self.options.max_history > 0 && self.undo_stack.len() > self.options.max_history {
            self.undo_stack.remove(0);
        }
    }

    // --- History ---

    /// Reverse the most recent operation. Returns false on an empty stack.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo_stack.pop() else {
            return false;
        };
        debug!(session = %self.session_id, layer = %op.layer_id, kind = ?op.kind, "undo");

        match op.kind {
            EditOpKind::Create => {
                if let Some(index) = self.current.layer_index(&op.layer_id) {
                    self.current.layers.remove(index);
                }
            }
            EditOpKind::Delete => {
                if let Some(snapshot) = &op.before {
                    let index = snapshot.index.min(self.current.layers.len());
                    self.current.layers.insert(index, snapshot.layer.clone());
                }
            }
            EditOpKind::Update | EditOpKind::Reorder => {
                if let (Some(snapshot), Some(index)) =
                    (&op.before, self.current.layer_index(&op.layer_id))
                {
                    self.current.layers[index] = snapshot.layer.clone();
                }
            }
        }

        self.redo_stack.push(op);
        true
    }

    /// Reapply the most recently undone operation. Returns false on an
    /// empty stack.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.redo_stack.pop() else {
            return false;
        };
        debug!(session = %self.session_id, layer = %op.layer_id, kind = ?op.kind, "redo");

        match op.kind {
            EditOpKind::Create => {
                if let Some(snapshot) = &op.after {
                    let index = snapshot.index.min(self.current.layers.len());
                    self.current.layers.insert(index, snapshot.layer.clone());
                }
            }
            EditOpKind::Delete => {
                if let Some(index) = self.current.layer_index(&op.layer_id) {
                    self.current.layers.remove(index);
                }
            }
            EditOpKind::Update | EditOpKind::Reorder => {
                if let (Some(snapshot), Some(index)) =
                    (&op.after, self.current.layer_index(&op.layer_id))
                {
                    self.current.layers[index] = snapshot.layer.clone();
                }
            }
        }

        self.undo_stack.push(op);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clean means no pending undo history.
    pub fn is_dirty(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    // --- Views ---

    pub fn get_layer(&self, layer_id: &str) -> Option<&Layer> {
        self.current.find_layer(layer_id)
    }

    pub fn layer_count(&self) -> usize {
        self.current.layers.len()
    }

    pub fn original(&self) -> &Document {
        &self.original
    }

    pub fn current(&self) -> &Document {
        &self.current
    }

    /// Deep clone of the current state, disconnected from the session:
    /// later commands never retroactively alter an exported document.
    pub fn export(&self) -> Document {
        self.current.clone()
    }

    /// Structural original-vs-current comparison by layer id.
    pub fn get_diff(&self) -> SessionDiff {
        diff_documents(&self.original, &self.current)
    }

    /// Document validation plus editor-only checks.
    ///
    /// A rect reaching beyond the canvas by more than the configured
    /// tolerance is a warning, not an error; overhang is sometimes a
    /// deliberate bleed.
    pub fn validate_session(&self) -> SessionValidation {
        let ValidationReport { valid, errors } = validate(&self.current);

        let mut warnings = Vec::new();
        let canvas = &self.current.canvas;
        let tolerance = self.options.out_of_bounds_tolerance;
        for layer in &self.current.layers {
            let rect = layer.rect();
            let out = rect.x < -tolerance
                || rect.y < -tolerance
                || rect.x + rect.w > canvas.width + tolerance
                || rect.y + rect.h > canvas.height + tolerance;
            if out {
                warnings.push(
                    ValidationIssue::warning(
                        IssueCode::OutOfBounds,
                        format!(
                            "layer '{}' extends beyond the {}x{} canvas",
                            layer.id(),
                            canvas.width,
                            canvas.height
                        ),
                    )
                    .for_layer(layer.id()),
                );
            }
        }

        SessionValidation {
            valid,
            errors,
            warnings,
        }
    }

    // --- Orchestration over the sibling engines ---

    /// Score the current state of the document under edit.
    pub fn confidence_report(&self, options: &ScorerOptions) -> ConfidenceReport {
        score_template(&self.current, options)
    }

    /// Overflow diagnostic for one layer at its current font size.
    pub fn detect_overflow(
        &self,
        layer_id: &str,
        measurer: &dyn TextMeasurer,
    ) -> Result<OverflowReport, EditError> {
        let layer = self
            .current
            .find_layer(layer_id)
            .ok_or_else(|| EditError::LayerNotFound(layer_id.to_string()))?;
        Ok(detect_overflow(layer, &self.current.bindings, measurer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::RectPatch;
    use easel_document::test_fixtures::{text_layer, two_layer_document};

    fn session() -> EditSession {
        EditSession::new("s-1", two_layer_document()).unwrap()
    }

    #[test]
    fn test_open_session_is_clean() {
        let session = session();
        assert!(!session.is_dirty());
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert!(session.get_diff().is_empty());
    }

    #[test]
    fn test_invalid_document_rejected_at_construction() {
        let mut doc = two_layer_document();
        doc.canvas.width = 0.0;

        let err = EditSession::new("s-1", doc).unwrap_err();
        assert!(matches!(err, EditError::InvalidDocument(_)));
    }

    #[test]
    fn test_create_duplicate_id_rejected_without_side_effects() {
        let mut session = session();
        let err = session.create_layer(text_layer("headline", 3)).unwrap_err();

        assert_eq!(err, EditError::DuplicateId("headline".to_string()));
        assert_eq!(session.layer_count(), 2);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_update_missing_layer_rejected() {
        let mut session = session();
        let err = session
            .update_layer("ghost", &LayerPatch::z(1))
            .unwrap_err();
        assert_eq!(err, EditError::LayerNotFound("ghost".to_string()));
    }

    #[test]
    fn test_rejected_update_leaves_session_unchanged() {
        let mut session = session();
        let before = session.export();

        let patch = LayerPatch::rect(RectPatch {
            w: Some(-1.0),
            ..Default::default()
        });
        assert!(session.update_layer("headline", &patch).is_err());

        assert_eq!(session.export(), before);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_reorder_touches_only_z() {
        let mut session = session();
        session.reorder_layer("headline", 9).unwrap();

        let layer = session.get_layer("headline").unwrap();
        assert_eq!(layer.z(), 9);
        assert_eq!(layer.rect().x, 100.0);

        let diff = session.get_diff();
        assert!(diff.modified[0].z.is_some());
        assert!(diff.modified[0].rect.is_none());
    }

    #[test]
    fn test_export_is_disconnected_from_later_mutation() {
        let mut session = session();
        let exported = session.export();

        session.delete_layer("headline").unwrap();

        assert_eq!(exported.layers.len(), 2);
        assert_eq!(session.layer_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_is_warning_not_error() {
        let mut session = session();
        let patch = LayerPatch::rect(RectPatch {
            x: Some(2000.0),
            ..Default::default()
        });
        session.update_layer("headline", &patch).unwrap();

        let validation = session.validate_session();
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
        assert_eq!(validation.warnings.len(), 1);
        assert_eq!(validation.warnings[0].code, IssueCode::OutOfBounds);
    }

    #[test]
    fn test_history_cap_trims_oldest() {
        let mut session = EditSession::with_options(
            "s-1",
            two_layer_document(),
            SessionOptions {
                max_history: 2,
                ..Default::default()
            },
        )
        .unwrap();

        for z in 1..=3 {
            session.reorder_layer("headline", z).unwrap();
        }

        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.undo(), "third undo exceeds the cap");
    }
}
