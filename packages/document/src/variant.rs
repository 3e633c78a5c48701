//! Variant application.
//!
//! A variant substitutes alternate binding values into a template for A/B
//! creative testing. Applying one produces a new document; the input is
//! never mutated.

use crate::model::{Bindings, Document};
use serde::{Deserialize, Serialize};

/// Alternate binding values for one rendered variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VariantSpec {
    #[serde(default)]
    pub overrides: Bindings,
}

/// Produce a new document with `spec.overrides` shallow-merged into the
/// document's binding tables. Keys present in the override win; everything
/// else carries over unchanged.
pub fn apply_variant(document: &Document, spec: &VariantSpec) -> Document {
    let mut result = document.clone();

    for (key, value) in &spec.overrides.text {
        result.bindings.text.insert(key.clone(), value.clone());
    }
    for (key, value) in &spec.overrides.assets {
        result.bindings.assets.insert(key.clone(), value.clone());
    }

    result
}
