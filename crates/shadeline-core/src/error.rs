//! Error types for the classification pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while processing a document.
///
/// Nothing below the CLI boundary recovers from these; they propagate
/// uncaught and a failure partway through a run writes no output.
#[derive(Error, Debug)]
pub enum ShadelineError {
    /// The input PDF path does not exist. Raised before any processing.
    #[error("PDF file not found: {0}")]
    InputNotFound(PathBuf),

    /// pdfium could not be bound, or the PDF could not be decoded/rendered.
    #[error("PDF rendering error: {0}")]
    Render(String),

    /// Tesseract failed to initialize or to process a page image.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// File I/O error while writing the report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error while writing the report.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Type alias for [`Result<T, ShadelineError>`].
pub type Result<T> = std::result::Result<T, ShadelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_embeds_path() {
        let err = ShadelineError::InputNotFound(PathBuf::from("/tmp/missing.pdf"));
        assert_eq!(err.to_string(), "PDF file not found: /tmp/missing.pdf");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ShadelineError = io_err.into();
        match err {
            ShadelineError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn render_error_display() {
        let err = ShadelineError::Render("corrupt xref table".to_string());
        assert_eq!(err.to_string(), "PDF rendering error: corrupt xref table");
    }
}
