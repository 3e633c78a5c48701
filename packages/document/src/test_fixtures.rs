//! Canned documents and layers shared across test suites.
//!
//! Enabled for this crate's own tests and, via the `fixtures` feature, for
//! downstream packages.

use crate::model::*;

pub fn canvas(width: f64, height: f64) -> Canvas {
    Canvas {
        width,
        height,
        background_color: "#ffffff".to_string(),
    }
}

pub fn text_layer(id: &str, z: i32) -> Layer {
    Layer::Text {
        common: LayerCommon {
            id: id.to_string(),
            z,
            rect: Rect::new(100.0, 100.0, 400.0, 100.0),
            visible: true,
            binding: None,
        },
        text_style: TextStyle {
            font_family: "Inter".to_string(),
            font_weight: 700,
            font_size: 48.0,
            line_height: 1.2,
            letter_spacing: 0.0,
            color: "#111111".to_string(),
            align: TextAlign::Left,
            valign: VerticalAlign::Top,
        },
        text: "Summer Sale".to_string(),
        constraints: None,
    }
}

pub fn image_layer(id: &str, z: i32) -> Layer {
    Layer::Image {
        common: LayerCommon {
            id: id.to_string(),
            z,
            rect: Rect::new(0.0, 0.0, 1080.0, 1080.0),
            visible: true,
            binding: None,
        },
        image_style: ImageStyle {
            fit: ImageFit::Cover,
            anchor: ImageAnchor::Center,
            border_radius: 0.0,
            opacity: 1.0,
        },
        src: "assets/hero.png".to_string(),
    }
}

pub fn shape_layer(id: &str, z: i32) -> Layer {
    Layer::Shape {
        common: LayerCommon {
            id: id.to_string(),
            z,
            rect: Rect::new(0.0, 900.0, 1080.0, 180.0),
            visible: true,
            binding: None,
        },
        shape: Shape {
            kind: ShapeKind::Rect,
            fill: "#f4f4f4".to_string(),
            stroke: None,
            radius: 12.0,
            gradient: None,
            shadow: None,
        },
    }
}

/// The two-layer fixture used by the end-to-end editing scenario:
/// a `headline` text layer and a full-canvas `image` layer at z 5.
pub fn two_layer_document() -> Document {
    Document {
        document_id: "doc-1".to_string(),
        canvas: canvas(1080.0, 1080.0),
        layers: vec![text_layer("headline", 1), image_layer("image", 5)],
        bindings: Bindings::default(),
        meta: DocumentMeta::default(),
    }
}
