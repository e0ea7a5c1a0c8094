//! Seams to the collaborators this crate does not implement itself:
//! deck parsing, slide rendering, page layout/OCR, and tokenization.
//!
//! Errors from these traits are propagated unchanged; nothing here
//! retries.

use crate::error::Result;
use crate::source::Source;
use crate::types::{Deck, TextBox};
use crate::window::PageWindow;

/// Parses a slide deck into its shape trees.
pub trait DeckReader {
    /// Read every slide of the deck.
    fn read_deck(&self, source: &Source) -> Result<Deck>;
}

/// Renders slide thumbnails.
pub trait SlideRenderer {
    /// Render one compressed image per slide in `window`, scaled by
    /// `scale` in both dimensions. The source is opened afresh.
    fn render_thumbnails(
        &self,
        source: &Source,
        window: PageWindow,
        scale: f32,
    ) -> Result<Vec<Vec<u8>>>;
}

/// What a page layout backend hands back for a window of pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayoutOutput {
    /// Page count of the whole document.
    pub total_pages: usize,

    /// Raw text boxes, one list per processed page, in reading order.
    pub pages: Vec<Vec<TextBox>>,

    /// One rendered image per processed page.
    pub images: Vec<Vec<u8>>,
}

/// Rasterizes pages and detects their text boxes.
pub trait PageLayout {
    /// Analyze the pages in `window`, rendering at `zoom`.
    fn analyze(&self, source: &Source, window: PageWindow, zoom: f32)
        -> Result<PageLayoutOutput>;
}

/// Splits text into index tokens, returned space-separated.
pub trait Tokenizer {
    /// Coarse tokenization.
    fn tokenize(&self, text: &str) -> Result<String>;

    /// Re-split already-tokenized text into finer tokens.
    fn fine_grained_tokenize(&self, tokens: &str) -> Result<String>;

    /// Tokenization for text classified as English.
    fn tokenize_english(&self, text: &str) -> Result<String> {
        self.tokenize(text)
    }
}
