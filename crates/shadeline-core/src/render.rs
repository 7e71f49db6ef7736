//! PDF page rasterization via pdfium.

use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;

use crate::error::{Result, ShadelineError};

/// PDF points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Default rasterization density. Higher DPI improves detection quality
/// at the cost of render and OCR time.
pub const DEFAULT_DPI: f32 = 200.0;

/// Renders the pages of a PDF document to in-memory images.
pub struct PdfRasterizer {
    pdfium: Pdfium,
    dpi: f32,
}

impl PdfRasterizer {
    /// Create a rasterizer at [`DEFAULT_DPI`].
    ///
    /// # Errors
    ///
    /// Returns [`ShadelineError::Render`] if no pdfium library can be
    /// bound (neither next to the executable nor system-wide).
    pub fn new() -> Result<Self> {
        Self::with_dpi(DEFAULT_DPI)
    }

    /// Create a rasterizer with a custom DPI.
    pub fn with_dpi(dpi: f32) -> Result<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| {
                    ShadelineError::Render(format!("failed to bind pdfium library: {e}"))
                })?,
        );
        Ok(Self { pdfium, dpi })
    }

    /// Render every page of the document, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`ShadelineError::Render`] if the PDF cannot be decoded
    /// or a page fails to render.
    pub fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>> {
        let document = self.pdfium.load_pdf_from_file(path, None).map_err(|e| {
            ShadelineError::Render(format!("failed to load PDF {}: {e}", path.display()))
        })?;

        let page_count = document.pages().len();
        tracing::debug!("rasterizing {} pages from {}", page_count, path.display());

        let mut pages = Vec::with_capacity(usize::from(page_count));
        for page in document.pages().iter() {
            pages.push(self.render_page(&page)?);
        }
        Ok(pages)
    }

    /// Render a single page at the configured DPI.
    #[allow(clippy::cast_possible_truncation)] // page sizes in points are small
    fn render_page(&self, page: &PdfPage) -> Result<DynamicImage> {
        let scale = self.dpi / POINTS_PER_INCH;
        let pixel_width = (page.width().value * scale) as i32;
        let pixel_height = (page.height().value * scale) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(pixel_width)
                    .set_target_height(pixel_height)
                    .render_form_data(true)
                    .render_annotations(true),
            )
            .map_err(|e| ShadelineError::Render(format!("failed to render PDF page: {e}")))?;

        Ok(bitmap.as_image())
    }
}
