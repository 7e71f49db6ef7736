//! Text block detection.
//!
//! Tesseract's TSV renderer reports every candidate region as a row of
//! parallel fields. Each row is turned into a single [`TextBox`] record
//! here, once, so nothing downstream indexes parallel arrays. Rows for
//! structural levels (page/block/paragraph/line) carry empty text and
//! are filtered at the classification seam, not here.

use image::DynamicImage;

use crate::error::Result;
#[cfg(feature = "tesseract")]
use crate::error::ShadelineError;

/// One candidate text region as reported by the detector.
///
/// Coordinates are pixels relative to the page image the detector saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBox {
    /// Recognized text. May be empty or whitespace-only for structural rows.
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Seam between the pipeline and the OCR engine.
///
/// The real implementation is [`TesseractDetector`]; tests substitute a
/// fake that returns canned boxes.
pub trait BoxDetector {
    /// Detect candidate text regions in a page image, in the detector's
    /// native order. The order is preserved all the way to the report.
    fn detect_boxes(&mut self, image: &DynamicImage) -> Result<Vec<TextBox>>;
}

/// Word-level box detector backed by Tesseract via leptess.
#[cfg(feature = "tesseract")]
pub struct TesseractDetector {
    engine: leptess::LepTess,
}

#[cfg(feature = "tesseract")]
impl TesseractDetector {
    /// Create a detector using the English traineddata.
    ///
    /// # Errors
    ///
    /// Returns [`ShadelineError::Ocr`] if the Tesseract runtime or its
    /// language data cannot be loaded.
    pub fn new() -> Result<Self> {
        Self::with_language("eng")
    }

    /// Create a detector for a specific Tesseract language code.
    pub fn with_language(lang: &str) -> Result<Self> {
        let engine = leptess::LepTess::new(None, lang).map_err(|e| {
            ShadelineError::Ocr(format!("failed to initialize Tesseract ({lang}): {e}"))
        })?;
        Ok(Self { engine })
    }
}

#[cfg(feature = "tesseract")]
impl BoxDetector for TesseractDetector {
    fn detect_boxes(&mut self, image: &DynamicImage) -> Result<Vec<TextBox>> {
        // Leptonica wants an encoded buffer, not raw pixels.
        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| ShadelineError::Ocr(format!("failed to encode page for OCR: {e}")))?;

        self.engine
            .set_image_from_mem(&png)
            .map_err(|e| ShadelineError::Ocr(format!("Tesseract rejected page image: {e}")))?;

        let tsv = self
            .engine
            .get_tsv_text(0)
            .map_err(|e| ShadelineError::Ocr(format!("Tesseract produced invalid UTF-8: {e}")))?;

        Ok(parse_tsv(&tsv))
    }
}

/// Parse Tesseract TSV output into box records.
///
/// Columns are: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. The text column is the line
/// remainder, so embedded tabs cannot split it. A header row (non-numeric
/// coordinates) and malformed rows are skipped.
pub fn parse_tsv(tsv: &str) -> Vec<TextBox> {
    let mut boxes = Vec::new();

    for line in tsv.lines() {
        let mut fields = line.splitn(12, '\t');
        let meta: Vec<&str> = fields.by_ref().take(11).collect();
        if meta.len() != 11 {
            continue;
        }
        let text = fields.next().unwrap_or("");

        let Ok(left) = meta[6].parse::<i32>() else {
            continue;
        };
        let Ok(top) = meta[7].parse::<i32>() else {
            continue;
        };
        let Ok(width) = meta[8].parse::<i32>() else {
            continue;
        };
        let Ok(height) = meta[9].parse::<i32>() else {
            continue;
        };

        boxes.push(TextBox {
            text: text.to_string(),
            left,
            top,
            width,
            height,
        });
    }

    boxes
}
