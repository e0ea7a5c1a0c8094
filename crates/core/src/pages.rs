//! Page-document extraction: layout boxes filtered into per-page text,
//! paired with the rendered page images.

use crate::backend::PageLayout;
use crate::deck::Extraction;
use crate::error::{Error, Result};
use crate::filter::is_garbage;
use crate::progress::Progress;
use crate::source::Source;
use crate::types::TextBox;
use crate::window::PageWindow;

/// Default render zoom for page images.
pub const DEFAULT_ZOOM: f32 = 3.0;

/// Extracts filtered text and page images from page documents.
pub struct PageDocumentExtractor<'a> {
    layout: &'a dyn PageLayout,
}

impl<'a> PageDocumentExtractor<'a> {
    /// Create an extractor over a layout backend.
    pub fn new(layout: &'a dyn PageLayout) -> Self {
        Self { layout }
    }

    /// Extract the pages in `window`, rendering at `zoom`.
    pub fn extract(
        &self,
        source: &Source,
        window: PageWindow,
        zoom: f32,
        progress: &mut dyn Progress,
    ) -> Result<Extraction> {
        let layout = self.layout.analyze(source, window, zoom)?;
        let last_page = window.clamped_end(layout.total_pages);
        progress.report(
            0.8,
            &format!("Page {}~{}: OCR finished", window.from_page, last_page),
        );

        if layout.pages.len() != layout.images.len() {
            return Err(Error::Misaligned {
                unit: "Pages",
                texts: layout.pages.len(),
                images: layout.images.len(),
            });
        }

        let texts: Vec<String> = layout.pages.iter().map(|boxes| page_text(boxes)).collect();
        log::debug!(
            "Filtered {} pages of {} ({} boxes kept of {})",
            texts.len(),
            layout.total_pages,
            texts.iter().map(|t| t.lines().count()).sum::<usize>(),
            layout.pages.iter().map(Vec::len).sum::<usize>()
        );

        let extraction = Extraction::aligned(
            "Pages",
            window.range(layout.total_pages).start,
            texts,
            layout.images,
            layout.total_pages,
        )?;
        progress.report(
            0.9,
            &format!("Page {}~{}: Parsing finished", window.from_page, last_page),
        );

        Ok(extraction)
    }
}

/// The non-garbage box texts of one page, in box order.
fn page_text(boxes: &[TextBox]) -> String {
    boxes
        .iter()
        .filter(|b| !is_garbage(&b.text))
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
