//! Placeholder slide thumbnails.
//!
//! No slide rasterizer ships with the CLI, so each slide gets a white
//! canvas with the deck's aspect ratio. Records keep their one image per
//! slide and the page index stays meaningful.

use image::{Rgb, RgbImage};
use pagechunk_core::{DeckReader, PageWindow, Result, SlideRenderer, Source};
use pagechunk_pdf::encode_jpeg;

/// Renders blank JPEG thumbnails, one per slide in the window.
pub struct BlankThumbnailRenderer<R> {
    reader: R,
}

impl<R: DeckReader> BlankThumbnailRenderer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: DeckReader> SlideRenderer for BlankThumbnailRenderer<R> {
    fn render_thumbnails(
        &self,
        source: &Source,
        window: PageWindow,
        scale: f32,
    ) -> Result<Vec<Vec<u8>>> {
        let deck = self.reader.read_deck(source)?;
        let (width, height) = deck.slide_size.unwrap_or_default().scaled(scale);
        let count = window.len_within(deck.slide_count());
        log::debug!("Rendering {} blank {}x{} thumbnails", count, width, height);

        (0..count)
            .map(|_| encode_jpeg(RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagechunk_core::{Deck, Slide, SlideSize};

    struct Slides(usize, Option<SlideSize>);

    impl DeckReader for Slides {
        fn read_deck(&self, _source: &Source) -> Result<Deck> {
            let deck = Deck::new((1..=self.0).map(Slide::new).collect());
            Ok(match self.1 {
                Some(size) => deck.with_slide_size(size),
                None => deck,
            })
        }
    }

    fn dimensions(jpeg: &[u8]) -> (u32, u32) {
        let decoded = image::load_from_memory(jpeg).unwrap();
        (decoded.width(), decoded.height())
    }

    #[test]
    fn test_one_thumbnail_per_windowed_slide() {
        let renderer = BlankThumbnailRenderer::new(Slides(5, None));
        let images = renderer
            .render_thumbnails(&Source::from(Vec::new()), PageWindow::new(2, 1_000_000), 0.5)
            .unwrap();

        assert_eq!(images.len(), 3);
        assert_eq!(dimensions(&images[0]), (640, 360));
    }

    #[test]
    fn test_thumbnail_follows_slide_size() {
        let size = SlideSize { width: 960, height: 720 };
        let renderer = BlankThumbnailRenderer::new(Slides(1, Some(size)));
        let images = renderer
            .render_thumbnails(&Source::from(Vec::new()), PageWindow::default(), 0.5)
            .unwrap();

        assert_eq!(dimensions(&images[0]), (480, 360));
    }
}
