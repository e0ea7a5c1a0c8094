//! Page layout through pdfium.

use crate::raster::encode_jpeg;
use pagechunk_core::{Error, PageLayout, PageLayoutOutput, PageWindow, Result, Source, TextBox};
use pdfium_render::prelude::*;
use std::cmp::Ordering;

/// A [`PageLayout`] reading text segments and rendering pages with pdfium.
///
/// Boxes come back in reading order (top to bottom, then left to
/// right) with bounding boxes in rendered-image pixels.
pub struct PdfiumLayout {
    pdfium: Pdfium,
}

impl PdfiumLayout {
    /// Bind pdfium from the working directory, then the system library.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`] when no pdfium library can be loaded.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::Layout(format!("Failed to bind pdfium library: {}", e)))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn page_boxes(&self, page: &PdfPage, zoom: f32) -> Result<Vec<TextBox>> {
        let page_height = page.height().value;
        let text = page
            .text()
            .map_err(|e| Error::Layout(format!("Failed to get page text: {}", e)))?;

        let mut boxes = Vec::new();
        for segment in text.segments().iter() {
            let content = segment.text();
            let content = content.trim();
            if content.is_empty() {
                continue;
            }

            // bottom-left origin to top-left
            let bounds = segment.bounds();
            let bbox = [
                bounds.left().value * zoom,
                (page_height - bounds.top().value) * zoom,
                bounds.right().value * zoom,
                (page_height - bounds.bottom().value) * zoom,
            ];
            boxes.push(TextBox::with_bbox(content, bbox));
        }

        boxes.sort_by(|a, b| reading_order(a, b));
        Ok(boxes)
    }

    fn render_page(&self, page: &PdfPage, zoom: f32) -> Result<Vec<u8>> {
        let bitmap = page
            .render_with_config(&PdfRenderConfig::new().scale_page_by_factor(zoom))
            .map_err(|e| Error::Render(format!("Failed to render PDF page: {}", e)))?;

        encode_jpeg(bitmap.as_image().to_rgb8())
    }
}

impl PageLayout for PdfiumLayout {
    fn analyze(&self, source: &Source, window: PageWindow, zoom: f32) -> Result<PageLayoutOutput> {
        let bytes = source.read_all()?;
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(&bytes, None)
            .map_err(|e| Error::Layout(format!("Failed to load PDF: {}", e)))?;

        let total_pages = document.pages().len() as usize;
        let range = window.range(total_pages);
        log::debug!(
            "Analyzing PDF pages {}..{} of {} at zoom {}",
            range.start,
            range.end,
            total_pages,
            zoom
        );

        let mut output = PageLayoutOutput {
            total_pages,
            ..Default::default()
        };

        for index in range {
            let page = document
                .pages()
                .get(index as PdfPageIndex)
                .map_err(|e| Error::Layout(format!("Failed to load page {}: {}", index, e)))?;

            let boxes = self.page_boxes(&page, zoom)?;
            log::trace!("Page {}: {} text segments", index, boxes.len());
            output.pages.push(boxes);
            output.images.push(self.render_page(&page, zoom)?);
        }

        Ok(output)
    }
}

fn reading_order(a: &TextBox, b: &TextBox) -> Ordering {
    match (a.bbox, b.bbox) {
        (Some(a), Some(b)) => {
            let top = a[1].partial_cmp(&b[1]).unwrap_or(Ordering::Equal);
            if top == Ordering::Equal {
                a[0].partial_cmp(&b[0]).unwrap_or(Ordering::Equal)
            } else {
                top
            }
        }
        _ => Ordering::Equal,
    }
}
