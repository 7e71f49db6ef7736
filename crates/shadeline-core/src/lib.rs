//! shadeline-core
//!
//! Library behind the `shadeline` CLI. It turns a PDF into page images,
//! locates text blocks with Tesseract, samples the grayscale brightness
//! under each block, and labels the block either `Prompt/Response`
//! (dark background) or `Commentary` (light background).
//!
//! The pipeline is a single synchronous pass:
//! 1. [`render::PdfRasterizer`] renders each page with pdfium
//! 2. [`detect::TesseractDetector`] produces [`detect::TextBox`] records
//! 3. [`classify::classify_blocks`] scores each box against the threshold
//! 4. [`report`] writes the accumulated rows to CSV and renders the
//!    console table

pub mod classify;
pub mod detect;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;

pub use classify::{
    classify_blocks, Classification, ClassifiedLine, ClassifyConfig, DEFAULT_PADDING,
    DEFAULT_THRESHOLD,
};
#[cfg(feature = "tesseract")]
pub use detect::TesseractDetector;
pub use detect::{parse_tsv, BoxDetector, TextBox};
pub use error::{Result, ShadelineError};
#[cfg(feature = "tesseract")]
pub use pipeline::process_pdf;
pub use pipeline::{classify_page, classify_pages, PipelineOptions};
pub use render::{PdfRasterizer, DEFAULT_DPI};
pub use report::{render_table, write_csv};
