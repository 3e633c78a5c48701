//! Binding resolution.
//!
//! Layers reference symbolic keys; resolution falls back to the layer's own
//! literal value and then to an empty string. Resolution is total: it never
//! fails, whatever the layer/binding combination.

use crate::model::{Binding, Bindings, Layer};

/// Resolve the text a text layer should render.
///
/// Non-text layers resolve to an empty string.
pub fn resolve_text(layer: &Layer, bindings: &Bindings) -> String {
    let Layer::Text { common, text, .. } = layer else {
        return String::new();
    };

    if let Some(Binding::Text { key }) = &common.binding {
        if let Some(value) = bindings.text.get(key) {
            return value.clone();
        }
    }

    text.clone()
}

/// Resolve the source an image layer should load.
///
/// Non-image layers resolve to an empty string.
pub fn resolve_image_source(layer: &Layer, bindings: &Bindings) -> String {
    let Layer::Image { common, src, .. } = layer else {
        return String::new();
    };

    if let Some(Binding::Asset { key }) = &common.binding {
        if let Some(value) = bindings.assets.get(key) {
            return value.clone();
        }
    }

    src.clone()
}
