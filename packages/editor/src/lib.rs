//! # Easel Editor
//!
//! Human-in-the-loop correction layer over extracted documents. Wraps one
//! document in an [`EditSession`] that exposes a small command vocabulary
//! (create / update / delete / reorder), full undo/redo, and an
//! original-vs-current diff for audit trails.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ session: command API + undo/redo state        │
//! │   ├─ operations: reversible op records,       │
//! │   │              typed layer patches          │
//! │   ├─ diff: field-level original-vs-current    │
//! │   └─ errors: rejection codes                  │
//! └───────────────────────────────────────────────┘
//!    orchestrates: confidence scoring, overflow checks
//! ```
//!
//! Commands validate before they mutate; a rejected command has no side
//! effects. Every accepted command is recorded as an [`EditOperation`]
//! carrying enough state to reverse it, so undo never recomputes. It
//! restores.

mod diff;
mod errors;
mod operations;
mod session;

pub use diff::{diff_documents, FieldChange, LayerDiff, SessionDiff};
pub use errors::EditError;
pub use operations::{
    apply_patch, BindingPatch, EditOpKind, EditOperation, ImageStylePatch, LayerPatch,
    LayerSnapshot, RectPatch, TextStylePatch,
};
pub use session::{EditSession, SessionOptions, SessionValidation};
