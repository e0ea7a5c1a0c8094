//! Core page/slide extraction for document ingestion.
//!
//! Slide decks and page documents both come out as a sequence of
//! page-aligned (text, image) pairs, wrapped into index [`Record`]s.
//! The i-th text always belongs to the i-th image; a run that cannot
//! keep that pairing fails with [`Error::Misaligned`].

pub mod backend;
pub mod deck;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod pages;
pub mod progress;
pub mod record;
pub mod script;
pub mod shape;
pub mod source;
pub mod tokenize;
pub mod types;
pub mod window;

pub use backend::{DeckReader, PageLayout, PageLayoutOutput, SlideRenderer, Tokenizer};
pub use deck::{Extraction, PageChunk, SlideDeckExtractor, THUMBNAIL_SCALE};
pub use dispatch::{ChunkOptions, Chunker, DECK_TO_PAGE};
pub use error::{Error, Result};
pub use filter::is_garbage;
pub use pages::{PageDocumentExtractor, DEFAULT_ZOOM};
pub use progress::{LogProgress, NoProgress, Progress};
pub use record::{DocumentDescriptor, Record};
pub use script::is_english;
pub use source::{ReadSeek, Source};
pub use tokenize::SimpleTokenizer;
pub use types::{Deck, DocumentFormat, Shape, Slide, SlideSize, Table, TextBox};
pub use window::{PageWindow, DEFAULT_TO_PAGE};
