//! Pixel-level comparison of a rendered document against a reference image.

use std::future::Future;

use easel_document::{Bindings, Document};
use image::{GrayImage, Luma, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::GoldenError;

/// Tolerances for a pixel comparison.
///
/// A pixel counts as differing when any of its four channels deviates by
/// more than `channel_tolerance`; the comparison passes when the share of
/// differing pixels stays at or below `max_diff_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffThresholds {
    pub channel_tolerance: u8,
    pub max_diff_percent: f64,
}

impl Default for DiffThresholds {
    fn default() -> Self {
        Self {
            channel_tolerance: 3,
            max_diff_percent: 0.5,
        }
    }
}

impl DiffThresholds {
    /// Bit-exact. For renders that must be reproducible down to the byte.
    pub fn strict() -> Self {
        Self {
            channel_tolerance: 0,
            max_diff_percent: 0.0,
        }
    }

    /// Forgiving of antialiasing and font-hinting drift across platforms.
    pub fn lenient() -> Self {
        Self {
            channel_tolerance: 8,
            max_diff_percent: 2.0,
        }
    }
}

/// Outcome of one comparison. `diff_map` is white where pixels differ,
/// black where they match, for eyeballing regressions.
#[derive(Debug, Clone)]
pub struct CompareResult {
    pub passed: bool,
    pub diff_percent: f64,
    pub diff_pixels: u64,
    pub diff_map: GrayImage,
}

/// Per-channel tolerance compare of two equally sized RGBA buffers.
///
/// A size mismatch is a structural failure, not a 100% pixel difference:
/// it usually means the canvas or export settings changed, which deserves
/// a louder signal than a failed threshold.
pub fn compare_images(
    reference: &RgbaImage,
    candidate: &RgbaImage,
    thresholds: &DiffThresholds,
) -> Result<CompareResult, GoldenError> {
    if reference.dimensions() != candidate.dimensions() {
        return Err(GoldenError::SizeMismatch {
            expected_w: reference.width(),
            expected_h: reference.height(),
            actual_w: candidate.width(),
            actual_h: candidate.height(),
        });
    }

    let (width, height) = reference.dimensions();
    let mut diff_map = GrayImage::new(width, height);
    let mut diff_pixels: u64 = 0;

    for (x, y, expected) in reference.enumerate_pixels() {
        let actual = candidate.get_pixel(x, y);
        let differs = expected
            .0
            .iter()
            .zip(actual.0.iter())
            .any(|(a, b)| a.abs_diff(*b) > thresholds.channel_tolerance);
        if differs {
            diff_pixels += 1;
            diff_map.put_pixel(x, y, Luma([255]));
        }
    }

    let total = u64::from(width) * u64::from(height);
    let diff_percent = if total == 0 {
        0.0
    } else {
        diff_pixels as f64 / total as f64 * 100.0
    };
    let passed = diff_percent <= thresholds.max_diff_percent;

    debug!(diff_pixels, diff_percent, passed, "pixel compare");

    Ok(CompareResult {
        passed,
        diff_percent,
        diff_pixels,
        diff_map,
    })
}

/// Render `document` through the injected renderer and compare the result
/// against `reference`.
///
/// The renderer is an external collaborator; the harness awaits it exactly
/// once and imposes no retry, timeout, or cancellation policy. Renderer
/// failures surface as [`GoldenError::Render`].
pub async fn render_and_compare<F, Fut, E>(
    document: &Document,
    bindings: &Bindings,
    reference: &RgbaImage,
    renderer: F,
    thresholds: &DiffThresholds,
) -> Result<CompareResult, GoldenError>
where
    F: FnOnce(Document, Bindings) -> Fut,
    Fut: Future<Output = Result<RgbaImage, E>>,
    E: std::fmt::Display,
{
    let candidate = renderer(document.clone(), bindings.clone())
        .await
        .map_err(|err| GoldenError::Render(err.to_string()))?;
    compare_images(reference, &candidate, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    #[test]
    fn test_identical_images_pass_strict() {
        let a = solid(10, 10, [10, 20, 30, 255]);
        let result = compare_images(&a, &a.clone(), &DiffThresholds::strict()).unwrap();

        assert!(result.passed);
        assert_eq!(result.diff_pixels, 0);
        assert_eq!(result.diff_percent, 0.0);
    }

    #[test]
    fn test_one_changed_pixel_fails_default_passes_lenient() {
        let reference = solid(10, 10, [10, 20, 30, 255]);
        let mut candidate = reference.clone();
        candidate.put_pixel(3, 7, Rgba([200, 20, 30, 255]));

        // 1 of 100 pixels = 1%
        let default = compare_images(&reference, &candidate, &DiffThresholds::default()).unwrap();
        assert!(!default.passed);
        assert_eq!(default.diff_pixels, 1);
        assert_eq!(default.diff_percent, 1.0);
        assert_eq!(default.diff_map.get_pixel(3, 7), &Luma([255]));
        assert_eq!(default.diff_map.get_pixel(0, 0), &Luma([0]));

        let lenient = compare_images(&reference, &candidate, &DiffThresholds::lenient()).unwrap();
        assert!(lenient.passed);
    }

    #[test]
    fn test_channel_tolerance_absorbs_small_drift() {
        let reference = solid(4, 4, [100, 100, 100, 255]);
        let candidate = solid(4, 4, [103, 98, 100, 255]);

        let result = compare_images(&reference, &candidate, &DiffThresholds::default()).unwrap();
        assert!(result.passed);
        assert_eq!(result.diff_pixels, 0);

        let strict = compare_images(&reference, &candidate, &DiffThresholds::strict()).unwrap();
        assert!(!strict.passed);
        assert_eq!(strict.diff_pixels, 16);
    }

    #[test]
    fn test_size_mismatch_is_a_structural_failure() {
        let reference = solid(10, 10, [0, 0, 0, 255]);
        let candidate = solid(10, 8, [0, 0, 0, 255]);

        let err = compare_images(&reference, &candidate, &DiffThresholds::default()).unwrap_err();
        assert!(matches!(
            err,
            GoldenError::SizeMismatch {
                expected_h: 10,
                actual_h: 8,
                ..
            }
        ));
    }
}
