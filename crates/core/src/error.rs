//! Error types for page and slide extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while chunking a document.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The filename extension matches none of the supported formats.
    #[error("file type not supported yet (ppt, pptx, pdf supported): {0}")]
    UnsupportedFormat(String),

    /// Extracted texts and rendered images no longer pair up one-to-one.
    #[error("{unit} text and image do not match: {texts} vs. {images}")]
    Misaligned {
        unit: &'static str,
        texts: usize,
        images: usize,
    },

    /// Failed to parse the PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// Failed to parse the legacy PPT file structure.
    #[error("PPT parsing error: {0}")]
    PptParseError(String),

    /// Invalid or corrupted file.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// OLE/CFB container error (for PPT).
    #[error("OLE/CFB error: {0}")]
    CfbError(String),

    /// The page layout/OCR backend failed.
    #[error("Page layout error: {0}")]
    Layout(String),

    /// The thumbnail or page renderer failed.
    #[error("Render error: {0}")]
    Render(String),

    /// The tokenizer failed.
    #[error("Tokenize error: {0}")]
    Tokenize(String),
}

impl Error {
    /// Whether this error means the text/image pairing was broken.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Error::Misaligned { .. })
    }
}
