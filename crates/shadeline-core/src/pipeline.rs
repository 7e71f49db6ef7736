//! Document pipeline: rasterize, detect, classify, report.
//!
//! Strictly sequential, one page at a time. The only run-lifetime
//! allocations are the rendered page list and the accumulated rows;
//! everything else is scoped to the page being processed.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::classify::{classify_blocks, ClassifiedLine, ClassifyConfig, DEFAULT_PADDING, DEFAULT_THRESHOLD};
use crate::detect::BoxDetector;
use crate::error::{Result, ShadelineError};
use crate::render::DEFAULT_DPI;
use crate::report;

/// Options for a full document run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Output CSV path. Defaults to the input path with a `csv` extension.
    pub output: Option<PathBuf>,
    /// Padding margin around each text block, in pixels.
    pub padding: u32,
    /// Brightness threshold (strict less-than comparison).
    pub threshold: u8,
    /// Rasterization density.
    pub dpi: f32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output: None,
            padding: DEFAULT_PADDING,
            threshold: DEFAULT_THRESHOLD,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Classify one page image: grayscale conversion, one detector pass,
/// then the block classifier over every box.
///
/// # Errors
///
/// Propagates detector failures unhandled.
pub fn classify_page(
    image: &DynamicImage,
    detector: &mut dyn BoxDetector,
    cfg: &ClassifyConfig,
) -> Result<Vec<ClassifiedLine>> {
    let gray = image.to_luma8();
    let boxes = detector.detect_boxes(image)?;
    Ok(classify_blocks(&gray, &boxes, cfg))
}

/// Classify a sequence of page images in order, accumulating one row
/// list. Row order is page order, then detector box order within a page.
///
/// # Errors
///
/// A failure on any page aborts the run; no partial result is returned.
pub fn classify_pages(
    pages: &[DynamicImage],
    detector: &mut dyn BoxDetector,
    cfg: &ClassifyConfig,
) -> Result<Vec<ClassifiedLine>> {
    let mut rows = Vec::new();
    for (idx, page) in pages.iter().enumerate() {
        tracing::info!("processing page {}/{}", idx + 1, pages.len());
        rows.extend(classify_page(page, detector, cfg)?);
    }
    Ok(rows)
}

/// Run the whole pipeline for one PDF and return the resolved output path.
///
/// Steps, in strict order: input existence check, rasterize every page,
/// classify every page, resolve the output path, write the CSV, print
/// the framed console table.
///
/// # Errors
///
/// Returns [`ShadelineError::InputNotFound`] before any processing if
/// the input does not exist; any later failure (rendering, OCR,
/// serialization) propagates and leaves no output file behind.
#[cfg(feature = "tesseract")]
pub fn process_pdf(pdf_path: &Path, opts: &PipelineOptions) -> Result<PathBuf> {
    use crate::detect::TesseractDetector;
    use crate::render::PdfRasterizer;

    if !pdf_path.exists() {
        return Err(ShadelineError::InputNotFound(pdf_path.to_path_buf()));
    }

    tracing::info!("converting PDF to images: {}", pdf_path.display());
    let rasterizer = PdfRasterizer::with_dpi(opts.dpi)?;
    let pages = rasterizer.rasterize(pdf_path)?;

    let mut detector = TesseractDetector::new()?;
    let cfg = ClassifyConfig {
        padding: opts.padding,
        threshold: opts.threshold,
    };
    let rows = classify_pages(&pages, &mut detector, &cfg)?;

    let output_path = opts
        .output
        .clone()
        .unwrap_or_else(|| resolve_output_path(pdf_path));

    tracing::info!("saving {} rows to {}", rows.len(), output_path.display());
    report::write_csv(&rows, &output_path)?;

    println!("{}", report::render_table(&rows));

    Ok(output_path)
}

/// Default output path: the input path with its extension replaced.
fn resolve_output_path(pdf_path: &Path) -> PathBuf {
    pdf_path.with_extension("csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;
    use crate::detect::TextBox;
    use image::{GrayImage, Luma};

    /// Returns one canned box list per call, in order.
    struct FakeDetector {
        pages: Vec<Vec<TextBox>>,
        calls: usize,
    }

    impl FakeDetector {
        fn new(pages: Vec<Vec<TextBox>>) -> Self {
            Self { pages, calls: 0 }
        }
    }

    impl BoxDetector for FakeDetector {
        fn detect_boxes(&mut self, _image: &DynamicImage) -> Result<Vec<TextBox>> {
            let boxes = self.pages[self.calls].clone();
            self.calls += 1;
            Ok(boxes)
        }
    }

    struct FailingDetector;

    impl BoxDetector for FailingDetector {
        fn detect_boxes(&mut self, _image: &DynamicImage) -> Result<Vec<TextBox>> {
            Err(ShadelineError::Ocr("no traineddata".to_string()))
        }
    }

    fn page(value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 60, Luma([value])))
    }

    fn word(text: &str) -> TextBox {
        TextBox {
            text: text.to_string(),
            left: 10,
            top: 10,
            width: 30,
            height: 12,
        }
    }

    #[test]
    fn pages_accumulate_in_order() {
        let pages = vec![page(0), page(255)];
        let mut detector = FakeDetector::new(vec![vec![word("dark")], vec![word("light")]]);
        let rows = classify_pages(&pages, &mut detector, &ClassifyConfig::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "dark");
        assert_eq!(rows[0].classification, Classification::PromptResponse);
        assert_eq!(rows[1].text, "light");
        assert_eq!(rows[1].classification, Classification::Commentary);
    }

    #[test]
    fn empty_text_boxes_are_filtered_per_page() {
        let pages = vec![page(0)];
        let mut detector = FakeDetector::new(vec![vec![word(""), word("   "), word("kept")]]);
        let rows = classify_pages(&pages, &mut detector, &ClassifyConfig::default()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "kept");
    }

    #[test]
    fn detector_failure_propagates() {
        let pages = vec![page(0)];
        let result = classify_pages(&pages, &mut FailingDetector, &ClassifyConfig::default());
        assert!(matches!(result, Err(ShadelineError::Ocr(_))));
    }

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(
            resolve_output_path(Path::new("/data/report.pdf")),
            PathBuf::from("/data/report.csv")
        );
        assert_eq!(
            resolve_output_path(Path::new("noext")),
            PathBuf::from("noext.csv")
        );
    }

    #[cfg(feature = "tesseract")]
    #[test]
    fn missing_input_is_rejected_before_processing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.pdf");
        let err = process_pdf(&missing, &PipelineOptions::default()).unwrap_err();

        match err {
            ShadelineError::InputNotFound(path) => assert_eq!(path, missing),
            other => panic!("expected InputNotFound, got {other:?}"),
        }
        assert!(!dir.path().join("absent.csv").exists());
    }
}
