//! # Edit Operations
//!
//! Reversible command records and the patch language for partial layer
//! updates.
//!
//! ## Design
//!
//! - Every committed command records the layer state (and list position) it
//!   needs to reverse itself: command pattern, not whole-document clones
//! - Patches are typed and partial: `{rect: {x: 150}}` moves a layer
//!   without touching its size
//! - Patch application is validate-then-build: an invalid patch never
//!   produces a half-updated layer

use crate::errors::EditError;
use easel_document::{
    Binding, ImageAnchor, ImageFit, Layer, Shape, TextAlign, TextConstraints, VerticalAlign,
};
use serde::{Deserialize, Serialize};

/// What a committed operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOpKind {
    Create,
    Update,
    Delete,
    Reorder,
}

/// A layer plus its position in the layer list, captured at commit time.
/// The index lets undo of a delete reinsert at the original position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub layer: Layer,
    pub index: usize,
}

/// One committed, reversible operation.
///
/// `before` is `None` for `create`; `after` is `None` for `delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOperation {
    #[serde(rename = "type")]
    pub kind: EditOpKind,
    pub layer_id: String,
    pub before: Option<LayerSnapshot>,
    pub after: Option<LayerSnapshot>,
    /// Commit time, epoch milliseconds
    pub timestamp: i64,
}

impl EditOperation {
    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    pub fn create(layer: Layer, index: usize) -> Self {
        Self {
            kind: EditOpKind::Create,
            layer_id: layer.id().to_string(),
            before: None,
            after: Some(LayerSnapshot { layer, index }),
            timestamp: Self::now_ms(),
        }
    }

    pub fn update(before: LayerSnapshot, after: LayerSnapshot) -> Self {
        Self {
            kind: EditOpKind::Update,
            layer_id: before.layer.id().to_string(),
            before: Some(before),
            after: Some(after),
            timestamp: Self::now_ms(),
        }
    }

    pub fn delete(before: LayerSnapshot) -> Self {
        Self {
            kind: EditOpKind::Delete,
            layer_id: before.layer.id().to_string(),
            before: Some(before),
            after: None,
            timestamp: Self::now_ms(),
        }
    }

    pub fn reorder(before: LayerSnapshot, after: LayerSnapshot) -> Self {
        Self {
            kind: EditOpKind::Reorder,
            layer_id: before.layer.id().to_string(),
            before: Some(before),
            after: Some(after),
            timestamp: Self::now_ms(),
        }
    }
}

/// Partial update for one layer. Absent fields stay untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<RectPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<BindingPatch>,
    /// Text layers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStylePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<TextConstraints>,
    /// Image layers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_style: Option<ImageStylePatch>,
    /// Shape layers only; replaced wholesale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

/// Set or clear a layer's binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingPatch {
    Set(Binding),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextStylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valign: Option<VerticalAlign>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageStylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<ImageAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl LayerPatch {
    /// Convenience for the most common correction: move/resize a layer.
    pub fn rect(rect: RectPatch) -> Self {
        Self {
            rect: Some(rect),
            ..Default::default()
        }
    }

    pub fn z(z: i32) -> Self {
        Self {
            z: Some(z),
            ..Default::default()
        }
    }
}

/// Apply `patch` to a copy of `layer`, validating as it goes.
///
/// Returns the patched layer; the input is untouched. Kind-specific patch
/// fields aimed at the wrong layer kind fail with `PatchMismatch`.
pub fn apply_patch(layer: &Layer, patch: &LayerPatch) -> Result<Layer, EditError> {
    let mut patched = layer.clone();
    let layer_id = layer.id().to_string();

    {
        let common = patched.common_mut();
        if let Some(rect_patch) = &patch.rect {
            if let Some(x) = rect_patch.x {
                common.rect.x = x;
            }
            if let Some(y) = rect_patch.y {
                common.rect.y = y;
            }
            if let Some(w) = rect_patch.w {
                common.rect.w = w;
            }
            if let Some(h) = rect_patch.h {
                common.rect.h = h;
            }
        }
        if let Some(z) = patch.z {
            common.z = z;
        }
        if let Some(visible) = patch.visible {
            common.visible = visible;
        }
        match &patch.binding {
            Some(BindingPatch::Set(binding)) => common.binding = Some(binding.clone()),
            Some(BindingPatch::Clear) => common.binding = None,
            None => {}
        }

        if !(common.rect.w > 0.0 && common.rect.h > 0.0) {
            return Err(EditError::InvalidDimensions {
                layer_id,
                w: common.rect.w,
                h: common.rect.h,
            });
        }
    }

    apply_kind_fields(&mut patched, patch, &layer_id)?;
    Ok(patched)
}

fn apply_kind_fields(
    patched: &mut Layer,
    patch: &LayerPatch,
    layer_id: &str,
) -> Result<(), EditError> {
    let mismatch = |kind: &'static str| EditError::PatchMismatch {
        layer_id: layer_id.to_string(),
        kind,
    };

    match patched {
        Layer::Text {
            text,
            text_style,
            constraints,
            ..
        } => {
            if patch.src.is_some() || patch.image_style.is_some() || patch.shape.is_some() {
                return Err(mismatch("text"));
            }
            if let Some(new_text) = &patch.text {
                *text = new_text.clone();
            }
            if let Some(new_constraints) = &patch.constraints {
                *constraints = Some(new_constraints.clone());
            }
            if let Some(style_patch) = &patch.text_style {
                if let Some(font_family) = &style_patch.font_family {
                    text_style.font_family = font_family.clone();
                }
                if let Some(font_weight) = style_patch.font_weight {
                    text_style.font_weight = font_weight;
                }
                if let Some(font_size) = style_patch.font_size {
                    if !(font_size > 0.0) {
                        return Err(EditError::InvalidFontSize {
                            layer_id: layer_id.to_string(),
                            font_size,
                        });
                    }
                    text_style.font_size = font_size;
                }
                if let Some(line_height) = style_patch.line_height {
                    text_style.line_height = line_height;
                }
                if let Some(letter_spacing) = style_patch.letter_spacing {
                    text_style.letter_spacing = letter_spacing;
                }
                if let Some(color) = &style_patch.color {
                    text_style.color = color.clone();
                }
                if let Some(align) = style_patch.align {
                    text_style.align = align;
                }
                if let Some(valign) = style_patch.valign {
                    text_style.valign = valign;
                }
            }
        }

        Layer::Image {
            src, image_style, ..
        } => {
            if patch.text.is_some()
                || patch.text_style.is_some()
                || patch.constraints.is_some()
                || patch.shape.is_some()
            {
                return Err(mismatch("image"));
            }
            if let Some(new_src) = &patch.src {
                *src = new_src.clone();
            }
            if let Some(style_patch) = &patch.image_style {
                if let Some(fit) = style_patch.fit {
                    image_style.fit = fit;
                }
                if let Some(anchor) = style_patch.anchor {
                    image_style.anchor = anchor;
                }
                if let Some(border_radius) = style_patch.border_radius {
                    image_style.border_radius = border_radius;
                }
                if let Some(opacity) = style_patch.opacity {
                    image_style.opacity = opacity;
                }
            }
        }

        Layer::Shape { shape, .. } => {
            if patch.text.is_some()
                || patch.text_style.is_some()
                || patch.constraints.is_some()
                || patch.src.is_some()
                || patch.image_style.is_some()
            {
                return Err(mismatch("shape"));
            }
            if let Some(new_shape) = &patch.shape {
                *shape = new_shape.clone();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_document::test_fixtures::{image_layer, text_layer};

    #[test]
    fn test_partial_rect_patch_moves_without_resizing() {
        let layer = text_layer("headline", 0);
        let patch = LayerPatch::rect(RectPatch {
            x: Some(150.0),
            ..Default::default()
        });

        let patched = apply_patch(&layer, &patch).unwrap();
        assert_eq!(patched.rect().x, 150.0);
        assert_eq!(patched.rect().w, layer.rect().w);
        assert_eq!(patched.rect().h, layer.rect().h);
    }

    #[test]
    fn test_zero_width_patch_rejected() {
        let layer = text_layer("headline", 0);
        let patch = LayerPatch::rect(RectPatch {
            w: Some(0.0),
            ..Default::default()
        });

        let err = apply_patch(&layer, &patch).unwrap_err();
        assert!(matches!(err, EditError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_zero_font_size_patch_rejected() {
        let layer = text_layer("headline", 0);
        let patch = LayerPatch {
            text_style: Some(TextStylePatch {
                font_size: Some(0.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        let err = apply_patch(&layer, &patch).unwrap_err();
        assert!(matches!(err, EditError::InvalidFontSize { .. }));
    }

    #[test]
    fn test_text_patch_on_image_layer_rejected() {
        let layer = image_layer("hero", 0);
        let patch = LayerPatch {
            text: Some("nope".to_string()),
            ..Default::default()
        };

        let err = apply_patch(&layer, &patch).unwrap_err();
        assert!(matches!(err, EditError::PatchMismatch { .. }));
    }

    #[test]
    fn test_binding_patch_sets_and_clears() {
        let layer = text_layer("headline", 0);

        let bound = apply_patch(
            &layer,
            &LayerPatch {
                binding: Some(BindingPatch::Set(Binding::Text {
                    key: "headline".to_string(),
                })),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(bound.common().binding.is_some());

        let cleared = apply_patch(
            &bound,
            &LayerPatch {
                binding: Some(BindingPatch::Clear),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(cleared.common().binding.is_none());
    }

    #[test]
    fn test_rejected_patch_leaves_input_untouched() {
        let layer = text_layer("headline", 0);
        let before = layer.clone();

        let patch = LayerPatch::rect(RectPatch {
            h: Some(-5.0),
            ..Default::default()
        });
        let _ = apply_patch(&layer, &patch);

        assert_eq!(layer, before);
    }

    #[test]
    fn test_operation_serializes_with_type_field() {
        let op = EditOperation::create(text_layer("headline", 0), 0);
        let json = serde_json::to_value(&op).unwrap();

        assert_eq!(json["type"], "create");
        assert!(json["before"].is_null());
        assert!(json["after"]["index"].is_number());
    }
}
