//! Core document types.
//!
//! A `Document` describes one ad layout: a canvas, an ordered list of
//! layers, and the binding tables that make the layout reusable across
//! variants. Everything here is a plain value type; cloning a document
//! yields a fully independent copy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root document node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    pub canvas: Canvas,
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub bindings: Bindings,
    #[serde(default)]
    pub meta: DocumentMeta,
}

/// Canvas dimensions and background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_background")]
    pub background_color: String,
}

fn default_background() -> String {
    "#ffffff".to_string()
}

/// Layer rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Width/height ratio normalized so it is always >= 1 for valid rects
    pub fn aspect_ratio(&self) -> f64 {
        if self.w >= self.h {
            self.w / self.h
        } else {
            self.h / self.w
        }
    }
}

/// Fields shared by every layer kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerCommon {
    /// Unique within the document
    pub id: String,
    /// Paint order: lower z paints first; ties break by insertion order
    #[serde(default)]
    pub z: i32,
    pub rect: Rect,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<Binding>,
}

fn default_visible() -> bool {
    true
}

/// Binding of a layer to a symbolic key in the document's binding tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    Text {
        #[serde(rename = "textKey")]
        key: String,
    },
    Asset {
        #[serde(rename = "assetKey")]
        key: String,
    },
}

/// Layer node (closed set of kinds; match exhaustively)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Layer {
    Text {
        #[serde(flatten)]
        common: LayerCommon,
        #[serde(rename = "textStyle")]
        text_style: TextStyle,
        /// Literal fallback when no binding resolves
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        constraints: Option<TextConstraints>,
    },

    Image {
        #[serde(flatten)]
        common: LayerCommon,
        #[serde(rename = "imageStyle")]
        image_style: ImageStyle,
        /// Literal fallback source when no binding resolves
        #[serde(default)]
        src: String,
    },

    Shape {
        #[serde(flatten)]
        common: LayerCommon,
        shape: Shape,
    },
}

/// Discriminant for a layer, for diagnostics and dispatch tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Text,
    Image,
    Shape,
}

impl Layer {
    pub fn common(&self) -> &LayerCommon {
        match self {
            Layer::Text { common, .. } => common,
            Layer::Image { common, .. } => common,
            Layer::Shape { common, .. } => common,
        }
    }

    pub fn common_mut(&mut self) -> &mut LayerCommon {
        match self {
            Layer::Text { common, .. } => common,
            Layer::Image { common, .. } => common,
            Layer::Shape { common, .. } => common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn z(&self) -> i32 {
        self.common().z
    }

    pub fn rect(&self) -> Rect {
        self.common().rect
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Text { .. } => LayerKind::Text,
            Layer::Image { .. } => LayerKind::Image,
            Layer::Shape { .. } => LayerKind::Shape,
        }
    }
}

/// Text styling for text layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    pub font_size: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub valign: VerticalAlign,
}

fn default_font_weight() -> u16 {
    400
}

fn default_line_height() -> f64 {
    1.2
}

fn default_color() -> String {
    "#000000".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Fitting constraints carried by a text layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextConstraints {
    pub min_font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<usize>,
}

/// Image styling for image layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    #[serde(default)]
    pub fit: ImageFit,
    #[serde(default)]
    pub anchor: ImageAnchor,
    #[serde(default)]
    pub border_radius: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageAnchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

/// Vector shape payload for shape layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub kind: ShapeKind,
    #[serde(default = "default_color")]
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub from: String,
    pub to: String,
    /// Degrees clockwise from vertical
    #[serde(default)]
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: String,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    #[serde(default)]
    pub blur: f64,
}

/// Symbolic key → literal value tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Bindings {
    #[serde(default)]
    pub text: HashMap<String, String>,
    #[serde(default)]
    pub assets: HashMap<String, String>,
}

/// Provenance metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionMeta>,
}

/// Hints produced by the extraction collaborator. These seed, but never
/// replace, the confidence scorer's own computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMeta {
    pub confidence_threshold: f64,
    #[serde(default)]
    pub infer_roles: bool,
    #[serde(default)]
    pub infer_constraints: bool,
}

impl Document {
    /// Layers in paint order: ascending `z`, insertion order breaking ties.
    ///
    /// The tie-break is a documented policy choice: conversion from source
    /// layouts assigns `z` by list position, so equal values must paint in
    /// the order they arrived to stay deterministic across implementations.
    pub fn sorted_layers(&self) -> Vec<&Layer> {
        let mut indexed: Vec<(usize, &Layer)> = self.layers.iter().enumerate().collect();
        indexed.sort_by_key(|(index, layer)| (layer.z(), *index));
        indexed.into_iter().map(|(_, layer)| layer).collect()
    }

    pub fn find_layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    pub fn find_layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{shape_layer, text_layer, two_layer_document};

    #[test]
    fn test_sorted_layers_orders_by_z() {
        let mut doc = two_layer_document();
        doc.layers.push(shape_layer("backdrop", -1));

        let order: Vec<&str> = doc.sorted_layers().iter().map(|l| l.id()).collect();
        assert_eq!(order, vec!["backdrop", "headline", "image"]);
    }

    #[test]
    fn test_sorted_layers_ties_break_by_insertion_order() {
        let mut doc = two_layer_document();
        doc.layers = vec![
            shape_layer("a", 3),
            shape_layer("b", 3),
            shape_layer("c", 3),
        ];

        let order: Vec<&str> = doc.sorted_layers().iter().map(|l| l.id()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_layer_serializes_with_kind_tag() {
        let layer = text_layer("headline", 1);
        let json = serde_json::to_value(&layer).unwrap();

        assert_eq!(json["kind"], "text");
        assert_eq!(json["id"], "headline");
        assert_eq!(json["textStyle"]["fontSize"], 48.0);
    }

    #[test]
    fn test_layer_roundtrips_through_json() {
        let layer = text_layer("headline", 1);
        let json = serde_json::to_string(&layer).unwrap();
        let back: Layer = serde_json::from_str(&json).unwrap();
        assert_eq!(layer, back);
    }

    #[test]
    fn test_visible_defaults_to_true() {
        let json = r##"{
            "kind": "shape",
            "id": "bg",
            "z": 0,
            "rect": {"x": 0.0, "y": 0.0, "w": 100.0, "h": 100.0},
            "shape": {"kind": "rect", "fill": "#222222"}
        }"##;

        let layer: Layer = serde_json::from_str(json).unwrap();
        assert!(layer.common().visible);
        assert!(layer.common().binding.is_none());
    }

    #[test]
    fn test_binding_distinguishes_text_and_asset_keys() {
        let text: Binding = serde_json::from_str(r#"{"textKey": "cta"}"#).unwrap();
        let asset: Binding = serde_json::from_str(r#"{"assetKey": "hero"}"#).unwrap();

        assert_eq!(text, Binding::Text { key: "cta".to_string() });
        assert_eq!(asset, Binding::Asset { key: "hero".to_string() });
    }
}
