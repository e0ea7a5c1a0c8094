//! Deck reader that picks PPTX or PPT parsing per document.

use pagechunk_core::{Deck, DeckReader, DocumentFormat, Error, Result, Source};
use pagechunk_ppt::PptParser;
use pagechunk_pptx::PptxParser;

/// Chooses the parser from the file's magic bytes, falling back to the
/// path's extension.
#[derive(Default)]
pub struct SniffingDeckReader {
    pptx: PptxParser,
    ppt: PptParser,
}

impl SniffingDeckReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn detect(&self, source: &Source) -> Result<DocumentFormat> {
        let magic = source.header(8)?;
        DocumentFormat::from_magic(&magic)
            .or_else(|| {
                source
                    .as_path()
                    .and_then(|p| p.to_str())
                    .and_then(DocumentFormat::from_filename)
            })
            .filter(DocumentFormat::is_slide_deck)
            .ok_or_else(|| {
                Error::CorruptedFile("neither a PPTX archive nor a PPT compound file".to_string())
            })
    }
}

impl DeckReader for SniffingDeckReader {
    fn read_deck(&self, source: &Source) -> Result<Deck> {
        match self.detect(source)? {
            DocumentFormat::Pptx => {
                log::debug!("Parsing as PPTX");
                self.pptx.read_deck(source)
            }
            _ => {
                log::debug!("Parsing as legacy PPT");
                self.ppt.read_deck(source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_magic() {
        let reader = SniffingDeckReader::new();

        let zip = Source::from(b"PK\x03\x04rest-of-archive".to_vec());
        assert_eq!(reader.detect(&zip).unwrap(), DocumentFormat::Pptx);

        let cfb = Source::from(vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0, 0]);
        assert_eq!(reader.detect(&cfb).unwrap(), DocumentFormat::Ppt);
    }

    #[test]
    fn test_pdf_is_not_a_deck() {
        let reader = SniffingDeckReader::new();
        let err = reader
            .read_deck(&Source::from(b"%PDF-1.7\n".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::CorruptedFile(_)));
    }

    #[test]
    fn test_unknown_bytes_without_path() {
        let reader = SniffingDeckReader::new();
        let err = reader
            .read_deck(&Source::from(b"plain text".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::CorruptedFile(_)));
    }
}
