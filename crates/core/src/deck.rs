//! Slide-deck extraction: per-slide text paired with per-slide thumbnails.

use crate::backend::{DeckReader, SlideRenderer};
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::script::is_english;
use crate::shape::slide_text;
use crate::source::Source;
use crate::window::PageWindow;

/// Thumbnail scale applied to both slide dimensions.
pub const THUMBNAIL_SCALE: f32 = 0.5;

/// One page or slide: its text and its image, same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChunk {
    /// 0-based index within the source document.
    pub index: usize,
    pub text: String,
    pub image: Vec<u8>,
}

/// The aligned output of one extraction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Pages or slides in the window, in document order.
    pub chunks: Vec<PageChunk>,

    /// Page or slide count of the whole document.
    pub total_pages: usize,

    /// Whether the extracted text reads as Latin/English script.
    pub is_english: bool,
}

impl Extraction {
    /// Zip texts and images positionally, failing if the counts differ.
    pub(crate) fn aligned(
        unit: &'static str,
        first_index: usize,
        texts: Vec<String>,
        images: Vec<Vec<u8>>,
        total_pages: usize,
    ) -> Result<Self> {
        if texts.len() != images.len() {
            return Err(Error::Misaligned {
                unit,
                texts: texts.len(),
                images: images.len(),
            });
        }

        let is_english = is_english(&texts);
        let chunks = texts
            .into_iter()
            .zip(images)
            .enumerate()
            .map(|(i, (text, image))| PageChunk {
                index: first_index + i,
                text,
                image,
            })
            .collect();

        Ok(Self {
            chunks,
            total_pages,
            is_english,
        })
    }
}

/// Extracts text and thumbnails from slide decks.
pub struct SlideDeckExtractor<'a> {
    reader: &'a dyn DeckReader,
    renderer: &'a dyn SlideRenderer,
    scale: f32,
}

impl<'a> SlideDeckExtractor<'a> {
    /// Create an extractor over the given collaborators.
    pub fn new(reader: &'a dyn DeckReader, renderer: &'a dyn SlideRenderer) -> Self {
        Self {
            reader,
            renderer,
            scale: THUMBNAIL_SCALE,
        }
    }

    /// Override the thumbnail scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Extract the slides in `window`.
    ///
    /// The source is read twice: once here for text, once by the
    /// renderer for thumbnails.
    pub fn extract(
        &self,
        source: &Source,
        window: PageWindow,
        progress: &mut dyn Progress,
    ) -> Result<Extraction> {
        let deck = self.reader.read_deck(source)?;
        let total_pages = deck.slide_count();

        let texts: Vec<String> = window.slice(&deck.slides).iter().map(slide_text).collect();
        log::debug!(
            "Extracted text from {} of {} slides (window {}..{})",
            texts.len(),
            total_pages,
            window.from_page,
            window.to_page
        );
        progress.report(0.5, "Text extraction finished.");

        let images = self.renderer.render_thumbnails(source, window, self.scale)?;
        let extraction = Extraction::aligned(
            "Slides",
            window.range(total_pages).start,
            texts,
            images,
            total_pages,
        )?;
        progress.report(0.9, "Image extraction finished");

        Ok(extraction)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{Deck, Shape, Slide, Table};
    use std::cell::Cell;
    use std::rc::Rc;

    /// A deck reader over a fixed deck, counting reads.
    pub(crate) struct FixedDeck {
        pub deck: Deck,
        pub reads: Cell<usize>,
    }

    impl FixedDeck {
        pub fn with_titles(titles: &[&str]) -> Self {
            let slides = titles
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let mut slide = Slide::new(i + 1);
                    if !t.is_empty() {
                        slide.add_shape(Shape::TextFrame(t.to_string()));
                    }
                    slide
                })
                .collect();
            Self {
                deck: Deck::new(slides),
                reads: Cell::new(0),
            }
        }
    }

    impl DeckReader for FixedDeck {
        fn read_deck(&self, _source: &Source) -> Result<Deck> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.deck.clone())
        }
    }

    /// Renders one byte per slide: the slide index. Can be told to
    /// drop the last image. Remembers the scale it was asked for.
    #[derive(Default)]
    pub(crate) struct IndexRenderer {
        pub total: usize,
        pub drop_last: bool,
        pub scale_seen: Rc<Cell<f32>>,
    }

    impl SlideRenderer for IndexRenderer {
        fn render_thumbnails(
            &self,
            _source: &Source,
            window: PageWindow,
            scale: f32,
        ) -> Result<Vec<Vec<u8>>> {
            self.scale_seen.set(scale);
            let mut images: Vec<Vec<u8>> = window.range(self.total).map(|i| vec![i as u8]).collect();
            if self.drop_last {
                images.pop();
            }
            Ok(images)
        }
    }

    fn source() -> Source {
        Source::from(b"deck".to_vec())
    }

    #[test]
    fn test_window_selects_slides() {
        let reader = FixedDeck::with_titles(&["s0", "s1", "s2", "s3", "s4"]);
        let renderer = IndexRenderer { total: 5, drop_last: false, ..Default::default() };
        let extractor = SlideDeckExtractor::new(&reader, &renderer);

        let out = extractor
            .extract(&source(), PageWindow::new(1, 3), &mut crate::NoProgress)
            .unwrap();

        assert_eq!(out.total_pages, 5);
        assert_eq!(out.chunks.len(), 2);
        assert_eq!(renderer.scale_seen.get(), THUMBNAIL_SCALE);
        assert_eq!(out.chunks[0], PageChunk { index: 1, text: "s1".into(), image: vec![1] });
        assert_eq!(out.chunks[1], PageChunk { index: 2, text: "s2".into(), image: vec![2] });
    }

    #[test]
    fn test_empty_slides_are_kept() {
        let reader = FixedDeck::with_titles(&["Intro", "", "Outro"]);
        let renderer = IndexRenderer { total: 3, drop_last: false, ..Default::default() };
        let out = SlideDeckExtractor::new(&reader, &renderer)
            .extract(&source(), PageWindow::default(), &mut crate::NoProgress)
            .unwrap();

        let texts: Vec<&str> = out.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Intro", "", "Outro"]);
    }

    #[test]
    fn test_table_and_group_text() {
        let mut slide = Slide::new(1);
        slide.add_shape(Shape::Table(Table::from_rows([["Name", "Age"], ["Alice", "30"]])));
        slide.add_shape(Shape::Group(vec![
            Shape::TextFrame("A".into()),
            Shape::TextFrame("".into()),
            Shape::TextFrame("B".into()),
        ]));
        let reader = FixedDeck {
            deck: Deck::new(vec![slide]),
            reads: Cell::new(0),
        };
        let renderer = IndexRenderer { total: 1, drop_last: false, ..Default::default() };

        let out = SlideDeckExtractor::new(&reader, &renderer)
            .extract(&source(), PageWindow::default(), &mut crate::NoProgress)
            .unwrap();

        assert_eq!(out.chunks[0].text, "Name: Alice; Age: 30\nA\nB");
    }

    #[test]
    fn test_mismatch_is_fatal() {
        let reader = FixedDeck::with_titles(&["a", "b", "c"]);
        let renderer = IndexRenderer { total: 3, drop_last: true, ..Default::default() };
        let mut reports = Vec::new();
        let mut progress = |p: f32, m: &str| reports.push((p, m.to_string()));

        let err = SlideDeckExtractor::new(&reader, &renderer)
            .extract(&source(), PageWindow::default(), &mut progress)
            .unwrap_err();

        assert!(err.is_integrity());
        assert_eq!(err.to_string(), "Slides text and image do not match: 3 vs. 2");
        // the completion milestone is never reached
        assert_eq!(reports, vec![(0.5, "Text extraction finished.".to_string())]);
    }

    #[test]
    fn test_progress_milestones() {
        let reader = FixedDeck::with_titles(&["one"]);
        let renderer = IndexRenderer { total: 1, drop_last: false, ..Default::default() };
        let mut reports = Vec::new();
        let mut progress = |p: f32, m: &str| reports.push((p, m.to_string()));

        SlideDeckExtractor::new(&reader, &renderer)
            .extract(&source(), PageWindow::default(), &mut progress)
            .unwrap();

        assert_eq!(
            reports,
            vec![
                (0.5, "Text extraction finished.".to_string()),
                (0.9, "Image extraction finished".to_string()),
            ]
        );
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let reader = FixedDeck::with_titles(&["Alpha", "Beta"]);
        let renderer = IndexRenderer { total: 2, drop_last: false, ..Default::default() };
        let extractor = SlideDeckExtractor::new(&reader, &renderer);

        let first = extractor
            .extract(&source(), PageWindow::default(), &mut crate::NoProgress)
            .unwrap();
        let second = extractor
            .extract(&source(), PageWindow::default(), &mut crate::NoProgress)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(reader.reads.get(), 2);
        assert!(first.is_english);
    }
}
