//! Domain types for decks, pages, and the formats we accept.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SLIDE_DECK_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pptx?$").unwrap());

static PAGE_DOCUMENT_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pdf$").unwrap());

/// A parsed slide deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    /// Slides in presentation order.
    pub slides: Vec<Slide>,

    /// Slide canvas size, when the file declares one.
    pub slide_size: Option<SlideSize>,
}

impl Deck {
    /// Create a deck from its slides.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides,
            slide_size: None,
        }
    }

    /// Attach the declared slide size.
    pub fn with_slide_size(mut self, size: SlideSize) -> Self {
        self.slide_size = Some(size);
        self
    }

    /// Total number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Slide canvas size in pixels at 96 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: u32,
    pub height: u32,
}

impl SlideSize {
    /// EMUs per pixel at 96 DPI.
    const EMU_PER_PIXEL: u64 = 9525;

    /// PPT master units (1/576 inch) per pixel at 96 DPI.
    const MASTER_UNITS_PER_PIXEL: u64 = 6;

    /// Build from English Metric Units, as declared in PPTX `p:sldSz`.
    pub fn from_emu(cx: u64, cy: u64) -> Self {
        Self {
            width: (cx / Self::EMU_PER_PIXEL) as u32,
            height: (cy / Self::EMU_PER_PIXEL) as u32,
        }
    }

    /// Build from master units, as declared in the PPT DocumentAtom.
    pub fn from_master_units(x: u64, y: u64) -> Self {
        Self {
            width: (x / Self::MASTER_UNITS_PER_PIXEL) as u32,
            height: (y / Self::MASTER_UNITS_PER_PIXEL) as u32,
        }
    }

    /// Scale both dimensions, never collapsing to zero.
    pub fn scaled(&self, factor: f32) -> (u32, u32) {
        let w = ((self.width as f32) * factor).round().max(1.0) as u32;
        let h = ((self.height as f32) * factor).round().max(1.0) as u32;
        (w, h)
    }
}

impl Default for SlideSize {
    /// 13.333in x 7.5in, the 16:9 default canvas.
    fn default() -> Self {
        Self::from_emu(12_192_000, 6_858_000)
    }
}

/// A single slide: its top-level shapes in z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Top-level shapes.
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// Create an empty slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            shapes: Vec::new(),
        }
    }

    /// Append a top-level shape.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// A node of a slide's visual tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A table (graphic frame holding `a:tbl`).
    Table(Table),
    /// A shape carrying a text frame; the raw frame text.
    TextFrame(String),
    /// A group of child shapes.
    Group(Vec<Shape>),
    /// Pictures, connectors, charts and anything else without text.
    Other,
}

/// A table grid. Row 0 is the header row.
///
/// Cells are `None` where the table has no cell of its own, such as
/// the continuation cells of a horizontal or vertical merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: usize,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Create a table with a declared column count.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table where every cell is present. Column count is the
    /// widest row.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<Vec<Option<String>>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| Some(c.into())).collect())
            .collect();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { columns, rows }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.columns = self.columns.max(row.len());
        self.rows.push(row);
    }

    /// Number of columns in the grid.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Number of rows, including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, or `None` if the cell is absent.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

/// One raw text box reported by a page layout/OCR backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// The recognized text.
    pub text: String,

    /// Bounding box `[x0, top, x1, bottom]` in page coordinates, if known.
    pub bbox: Option<[f32; 4]>,
}

impl TextBox {
    /// Create a text box without position info.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bbox: None,
        }
    }

    /// Create a text box with its bounding box.
    pub fn with_bbox(text: impl Into<String>, bbox: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            bbox: Some(bbox),
        }
    }
}

/// The format of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary).
    Ppt,
    /// PDF page document.
    Pdf,
}

impl DocumentFormat {
    /// Detect format from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if SLIDE_DECK_EXTENSION.is_match(filename) {
            if filename.to_lowercase().ends_with(".pptx") {
                Some(Self::Pptx)
            } else {
                Some(Self::Ppt)
            }
        } else if PAGE_DOCUMENT_EXTENSION.is_match(filename) {
            Some(Self::Pdf)
        } else {
            None
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }

    /// Whether this format goes through the slide-deck path.
    pub fn is_slide_deck(&self) -> bool {
        matches!(self, Self::Pptx | Self::Ppt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(DocumentFormat::from_filename("deck.pptx"), Some(DocumentFormat::Pptx));
        assert_eq!(DocumentFormat::from_filename("DECK.PPTX"), Some(DocumentFormat::Pptx));
        assert_eq!(DocumentFormat::from_filename("old.Ppt"), Some(DocumentFormat::Ppt));
        assert_eq!(DocumentFormat::from_filename("paper.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_filename("report.docx"), None);
        assert_eq!(DocumentFormat::from_filename("pptx"), None);
        assert_eq!(DocumentFormat::from_filename("notes.pdf.txt"), None);
    }

    #[test]
    fn test_format_from_magic() {
        assert_eq!(
            DocumentFormat::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0x00]),
            Some(DocumentFormat::Pptx)
        );
        assert_eq!(DocumentFormat::from_magic(b"%PDF-1.7"), Some(DocumentFormat::Pdf));
        assert_eq!(
            DocumentFormat::from_magic(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
            Some(DocumentFormat::Ppt)
        );
        assert_eq!(DocumentFormat::from_magic(b"abc"), None);
    }

    #[test]
    fn test_table_cells() {
        let mut table = Table::new(2);
        table.push_row(vec![Some("Name".into()), Some("Age".into())]);
        table.push_row(vec![Some("Alice".into()), None]);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(1, 0), Some("Alice"));
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_slide_size_conversions() {
        let size = SlideSize::default();
        assert_eq!(size, SlideSize { width: 1280, height: 720 });
        assert_eq!(size.scaled(0.5), (640, 360));

        // 10in x 7.5in in master units
        assert_eq!(
            SlideSize::from_master_units(5760, 4320),
            SlideSize { width: 960, height: 720 }
        );
    }
}
