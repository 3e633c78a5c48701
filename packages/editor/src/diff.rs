//! Structural document diffing.
//!
//! Compares two documents by layer id and reports, for each surviving
//! layer, only the top-level sub-objects that changed, not a full object
//! dump. `original` and `current` are independently owned copies, so the
//! diff can never observe aliased mutation between them.

use easel_document::{Binding, Document, ImageStyle, Layer, Rect, Shape, TextStyle};
use serde::{Deserialize, Serialize};

/// A changed value, before and after
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange<T> {
    pub before: T,
    pub after: T,
}

impl<T: Clone + PartialEq> FieldChange<T> {
    fn of(before: &T, after: &T) -> Option<Self> {
        if before == after {
            None
        } else {
            Some(Self {
                before: before.clone(),
                after: after.clone(),
            })
        }
    }
}

/// Changes to one layer, sub-object by sub-object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayerDiff {
    pub layer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<FieldChange<Rect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<FieldChange<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<FieldChange<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<FieldChange<Option<Binding>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<FieldChange<TextStyle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_style: Option<FieldChange<ImageStyle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<FieldChange<Shape>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<FieldChange<String>>,
}

impl LayerDiff {
    fn is_empty(&self) -> bool {
        self.rect.is_none()
            && self.z.is_none()
            && self.visible.is_none()
            && self.binding.is_none()
            && self.text_style.is_none()
            && self.image_style.is_none()
            && self.shape.is_none()
            && self.text.is_none()
            && self.src.is_none()
    }
}

/// Structural comparison of an original and a current document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionDiff {
    /// Layer ids present only in current
    pub added: Vec<String>,
    /// Layers present in both with at least one changed sub-object
    pub modified: Vec<LayerDiff>,
    /// Layer ids present only in original
    pub deleted: Vec<String>,
}

impl SessionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }
}

/// Diff two documents by layer id.
pub fn diff_documents(original: &Document, current: &Document) -> SessionDiff {
    let mut diff = SessionDiff::default();

    for layer in &current.layers {
        if original.find_layer(layer.id()).is_none() {
            diff.added.push(layer.id().to_string());
        }
    }

    for layer in &original.layers {
        match current.find_layer(layer.id()) {
            None => diff.deleted.push(layer.id().to_string()),
            Some(current_layer) => {
                let layer_diff = diff_layers(layer, current_layer);
                if !layer_diff.is_empty() {
                    diff.modified.push(layer_diff);
                }
            }
        }
    }

    diff
}

fn diff_layers(before: &Layer, after: &Layer) -> LayerDiff {
    let mut diff = LayerDiff {
        layer_id: before.id().to_string(),
        ..Default::default()
    };

    let (b, a) = (before.common(), after.common());
    diff.rect = FieldChange::of(&b.rect, &a.rect);
    diff.z = FieldChange::of(&b.z, &a.z);
    diff.visible = FieldChange::of(&b.visible, &a.visible);
    diff.binding = FieldChange::of(&b.binding, &a.binding);

    // Kind-specific sub-objects, compared only when the kinds line up.
    // The session API cannot change a layer's kind under a stable id.
    match (before, after) {
        (
            Layer::Text {
                text_style: bs,
                text: bt,
                ..
            },
            Layer::Text {
                text_style: as_,
                text: at,
                ..
            },
        ) => {
            diff.text_style = FieldChange::of(bs, as_);
            diff.text = FieldChange::of(bt, at);
        }
        (
            Layer::Image {
                image_style: bs,
                src: bsrc,
                ..
            },
            Layer::Image {
                image_style: as_,
                src: asrc,
                ..
            },
        ) => {
            diff.image_style = FieldChange::of(bs, as_);
            diff.src = FieldChange::of(bsrc, asrc);
        }
        (Layer::Shape { shape: bs, .. }, Layer::Shape { shape: as_, .. }) => {
            diff.shape = FieldChange::of(bs, as_);
        }
        _ => {}
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_document::test_fixtures::{shape_layer, two_layer_document};

    #[test]
    fn test_identical_documents_diff_empty() {
        let doc = two_layer_document();
        let diff = diff_documents(&doc, &doc.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn test_added_and_deleted_layers_reported_by_id() {
        let original = two_layer_document();
        let mut current = original.clone();
        current.layers.remove(0); // drop headline
        current.layers.push(shape_layer("badge", 9));

        let diff = diff_documents(&original, &current);
        assert_eq!(diff.added, vec!["badge"]);
        assert_eq!(diff.deleted, vec!["headline"]);
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn test_modified_layer_carries_only_changed_subobjects() {
        let original = two_layer_document();
        let mut current = original.clone();
        current.layers[0].common_mut().rect.x = 150.0;

        let diff = diff_documents(&original, &current);
        assert_eq!(diff.modified.len(), 1);

        let layer_diff = &diff.modified[0];
        assert_eq!(layer_diff.layer_id, "headline");
        let rect = layer_diff.rect.as_ref().unwrap();
        assert_eq!(rect.before.x, 100.0);
        assert_eq!(rect.after.x, 150.0);

        assert!(layer_diff.z.is_none());
        assert!(layer_diff.text_style.is_none());
        assert!(layer_diff.visible.is_none());
    }

    #[test]
    fn test_z_change_reported_separately_from_rect() {
        let original = two_layer_document();
        let mut current = original.clone();
        current.layers[1].common_mut().z = 1;

        let diff = diff_documents(&original, &current);
        let layer_diff = &diff.modified[0];
        assert!(layer_diff.z.is_some());
        assert!(layer_diff.rect.is_none());
    }
}
