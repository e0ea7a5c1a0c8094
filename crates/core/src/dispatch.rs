//! Format dispatch: filename → extractor → records.

use crate::backend::{DeckReader, PageLayout, SlideRenderer, Tokenizer};
use crate::deck::{Extraction, SlideDeckExtractor, THUMBNAIL_SCALE};
use crate::error::{Error, Result};
use crate::pages::{PageDocumentExtractor, DEFAULT_ZOOM};
use crate::progress::Progress;
use crate::record::{DocumentDescriptor, Record};
use crate::source::Source;
use crate::types::DocumentFormat;
use crate::window::PageWindow;
use serde::{Deserialize, Serialize};

/// Upper window bound used for slide decks, so the rest of the deck
/// after `from_page` is always processed.
pub const DECK_TO_PAGE: usize = 1_000_000;

/// Tunables for a [`Chunker`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptions {
    /// Render zoom for page documents.
    pub zoom: f32,

    /// Thumbnail scale for slides.
    pub thumbnail_scale: f32,

    /// Upper window bound that replaces the caller's for slide decks.
    pub deck_to_page: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            thumbnail_scale: THUMBNAIL_SCALE,
            deck_to_page: DECK_TO_PAGE,
        }
    }
}

impl ChunkOptions {
    /// Create options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page render zoom.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the slide thumbnail scale.
    pub fn with_thumbnail_scale(mut self, scale: f32) -> Self {
        self.thumbnail_scale = scale;
        self
    }
}

/// Turns documents into index records.
///
/// Holds one collaborator per concern; each `chunk` call is independent.
pub struct Chunker {
    deck_reader: Box<dyn DeckReader>,
    renderer: Box<dyn SlideRenderer>,
    layout: Box<dyn PageLayout>,
    tokenizer: Box<dyn Tokenizer>,
    options: ChunkOptions,
}

impl Chunker {
    /// Create a chunker from its collaborators.
    pub fn new(
        deck_reader: impl DeckReader + 'static,
        renderer: impl SlideRenderer + 'static,
        layout: impl PageLayout + 'static,
        tokenizer: impl Tokenizer + 'static,
    ) -> Self {
        Self {
            deck_reader: Box::new(deck_reader),
            renderer: Box::new(renderer),
            layout: Box::new(layout),
            tokenizer: Box::new(tokenizer),
            options: ChunkOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ChunkOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Chunk `filename`, reading `binary` when given and the file
    /// otherwise.
    ///
    /// The format comes from the filename extension alone. An
    /// unsupported extension fails before any extraction work.
    pub fn chunk(
        &self,
        filename: &str,
        binary: Option<Vec<u8>>,
        window: PageWindow,
        progress: &mut dyn Progress,
    ) -> Result<Vec<Record>> {
        let format = DocumentFormat::from_filename(filename)
            .ok_or_else(|| Error::UnsupportedFormat(filename.to_string()))?;

        let source = match binary {
            Some(bytes) => Source::from(bytes),
            None => Source::path(filename),
        };

        self.chunk_source(filename, format, &source, window, progress)
    }

    /// Chunk an already-opened source whose format is known.
    pub fn chunk_source(
        &self,
        filename: &str,
        format: DocumentFormat,
        source: &Source,
        window: PageWindow,
        progress: &mut dyn Progress,
    ) -> Result<Vec<Record>> {
        let descriptor = DocumentDescriptor::new(filename, self.tokenizer.as_ref())?;

        let extraction = match format {
            DocumentFormat::Pptx | DocumentFormat::Ppt => {
                let window = window.with_to_page(self.options.deck_to_page);
                log::info!("Chunking slide deck '{}' from slide {}", filename, window.from_page);
                SlideDeckExtractor::new(self.deck_reader.as_ref(), self.renderer.as_ref())
                    .with_scale(self.options.thumbnail_scale)
                    .extract(source, window, progress)?
            }
            DocumentFormat::Pdf => {
                log::info!(
                    "Chunking page document '{}' pages {}..{}",
                    filename,
                    window.from_page,
                    window.to_page
                );
                PageDocumentExtractor::new(self.layout.as_ref()).extract(
                    source,
                    window,
                    self.options.zoom,
                    progress,
                )?
            }
        };

        self.assemble(&descriptor, extraction)
    }

    fn assemble(&self, descriptor: &DocumentDescriptor, extraction: Extraction) -> Result<Vec<Record>> {
        let is_english = extraction.is_english;
        extraction
            .chunks
            .into_iter()
            .map(|chunk| {
                descriptor.to_record(chunk.index, chunk.image).tokenize_body(
                    &chunk.text,
                    is_english,
                    self.tokenizer.as_ref(),
                )
            })
            .collect()
    }
}
