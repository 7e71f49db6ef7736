//! Brightness-based block classification.
//!
//! For each detected box the classifier samples the grayscale page
//! around the box (expanded by a padding margin, clamped to the image),
//! takes the arithmetic mean of the pixel values, and compares it
//! against a fixed threshold: dark backgrounds are `Prompt/Response`,
//! light backgrounds are `Commentary`.

use image::GrayImage;
use serde::Serialize;

use crate::detect::TextBox;

/// Default padding margin around a box, in pixels.
pub const DEFAULT_PADDING: u32 = 10;

/// Default brightness threshold separating the two classes.
pub const DEFAULT_THRESHOLD: u8 = 180;

/// The two-valued label assigned to every classified block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    /// Mean brightness strictly below the threshold (dark background).
    #[serde(rename = "Prompt/Response")]
    PromptResponse,
    /// Mean brightness at or above the threshold (light background).
    Commentary,
}

impl Classification {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PromptResponse => "Prompt/Response",
            Self::Commentary => "Commentary",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row: the box's original (untrimmed) text and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Classification")]
    pub classification: Classification,
}

/// Classifier parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyConfig {
    /// Padding margin applied around each box before sampling.
    pub padding: u32,
    /// Brightness threshold; comparison is strict less-than.
    pub threshold: u8,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Filter predicate applied before classification: a box takes part only
/// if its trimmed text is non-empty.
fn has_text(b: &TextBox) -> bool {
    !b.text.trim().is_empty()
}

/// Expand a box by `padding` and clamp it to `[0, width) x [0, height)`.
///
/// Returns `None` when the clamped rectangle is empty, which happens for
/// degenerate detector output or boxes lying outside the image. The
/// arithmetic runs in `i64` so no coordinate can wrap.
// Sign loss / truncation safe: values are clamped to [0, width/height]
// before the casts below.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn padded_region(
    b: &TextBox,
    padding: u32,
    width: u32,
    height: u32,
) -> Option<(u32, u32, u32, u32)> {
    let p = i64::from(padding);
    let x1 = (i64::from(b.left) - p).max(0);
    let y1 = (i64::from(b.top) - p).max(0);
    let x2 = (i64::from(b.left) + i64::from(b.width) + p).min(i64::from(width));
    let y2 = (i64::from(b.top) + i64::from(b.height) + p).min(i64::from(height));

    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    Some((x1 as u32, y1 as u32, x2 as u32, y2 as u32))
}

/// Arithmetic mean of the luma values over `[x1, x2) x [y1, y2)`.
///
/// Callers guarantee a non-empty rectangle within the image.
#[allow(clippy::cast_precision_loss)]
fn region_mean(gray: &GrayImage, x1: u32, y1: u32, x2: u32, y2: u32) -> f64 {
    let mut sum: u64 = 0;
    for y in y1..y2 {
        for x in x1..x2 {
            sum += u64::from(gray.get_pixel(x, y).0[0]);
        }
    }
    let count = u64::from(x2 - x1) * u64::from(y2 - y1);
    sum as f64 / count as f64
}

/// Classify every box with non-empty trimmed text against the page's
/// grayscale data.
///
/// Pure function of its inputs: no I/O, no errors, and the output order
/// is exactly the detector's box order. Boxes whose padded, clamped
/// rectangle is empty sample no pixels; their mean is undefined and the
/// strict less-than comparison cannot hold, so they are labeled
/// [`Classification::Commentary`].
#[must_use]
pub fn classify_blocks(
    gray: &GrayImage,
    boxes: &[TextBox],
    cfg: &ClassifyConfig,
) -> Vec<ClassifiedLine> {
    let (width, height) = gray.dimensions();

    boxes
        .iter()
        .filter(|b| has_text(b))
        .map(|b| {
            let classification = match padded_region(b, cfg.padding, width, height) {
                Some((x1, y1, x2, y2)) => {
                    let mean = region_mean(gray, x1, y1, x2, y2);
                    if mean < f64::from(cfg.threshold) {
                        Classification::PromptResponse
                    } else {
                        Classification::Commentary
                    }
                }
                None => Classification::Commentary,
            };
            ClassifiedLine {
                text: b.text.clone(),
                classification,
            }
        })
        .collect()
}
