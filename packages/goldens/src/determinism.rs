//! Render-stability check: the same document must rasterize to the same
//! pixels every time. Non-determinism here usually traces back to text
//! shaping, font fallback, or time-seeded effects in the renderer.

use std::future::Future;

use easel_document::{Bindings, Document};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::{compare_images, DiffThresholds};
use crate::GoldenError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeterminismReport {
    pub deterministic: bool,
    pub diff_percent: f64,
}

/// Render the document twice through the injected renderer and compare the
/// two buffers with `channel_tolerance` per channel and zero tolerated
/// differing pixels.
pub async fn render_determinism<F, Fut, E>(
    document: &Document,
    bindings: &Bindings,
    renderer: F,
    channel_tolerance: u8,
) -> Result<DeterminismReport, GoldenError>
where
    F: Fn(Document, Bindings) -> Fut,
    Fut: Future<Output = Result<RgbaImage, E>>,
    E: std::fmt::Display,
{
    let first = renderer(document.clone(), bindings.clone())
        .await
        .map_err(|err| GoldenError::Render(err.to_string()))?;
    let second = renderer(document.clone(), bindings.clone())
        .await
        .map_err(|err| GoldenError::Render(err.to_string()))?;

    let thresholds = DiffThresholds {
        channel_tolerance,
        max_diff_percent: 0.0,
    };
    let result = compare_images(&first, &second, &thresholds)?;

    debug!(
        deterministic = result.passed,
        diff_percent = result.diff_percent,
        "determinism check"
    );

    Ok(DeterminismReport {
        deterministic: result.passed,
        diff_percent: result.diff_percent,
    })
}
