//! PPT file parser implementation.
//!
//! The "PowerPoint Document" stream is a tree of records. The Document
//! container's SlideListWithText (instance 0) lists the slides: each
//! SlidePersistAtom opens one, and the text atoms after it are that
//! slide's placeholder text. The persist directory maps the atom's
//! persist id to the Slide container, whose PPDrawing holds the shapes.

use crate::drawing::drawing_shapes;
use crate::record::{
    count_malformed, decode_latin1, decode_utf16, read_u32_le, record_at, record_types, Records,
};
use crate::text::{PlaceholderTexts, TextType};
use cfb::CompoundFile;
use pagechunk_core::{Deck, DeckReader, Error, Result, Shape, Slide, SlideSize, Source};
use std::collections::HashMap;
use std::io::{Read, Seek};

/// Minimum stream size for a valid PPT file (bytes).
const MIN_STREAM_SIZE: usize = 512;

/// Malformed records tolerated before the stream counts as corrupted.
const MAX_MALFORMED_RECORDS: usize = 10;

const POWERPOINT_STREAM: &str = "/PowerPoint Document";

/// SlideListWithText instance holding presentation slides (not masters
/// or notes).
const SLIDE_LIST_SLIDES: u16 = 0;

/// Parser for legacy PPT (OLE/CFB) files.
pub struct PptParser;

impl PptParser {
    /// Create a new PPT parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPT file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Deck> {
        let mut cfb = CompoundFile::open(reader)
            .map_err(|e| Error::CfbError(format!("Failed to open CFB container: {}", e)))?;

        let stream = self.read_powerpoint_stream(&mut cfb)?;
        let deck = parse_stream(&stream)?;

        if deck.slides.iter().all(|s| s.shapes.is_empty()) {
            log::warn!("No shapes found in {} slides", deck.slide_count());
        }

        Ok(deck)
    }

    /// Read the PowerPoint Document stream from the CFB container.
    fn read_powerpoint_stream<R: Read + Seek>(&self, cfb: &mut CompoundFile<R>) -> Result<Vec<u8>> {
        if !cfb.is_stream(POWERPOINT_STREAM) {
            return Err(Error::PptParseError(
                "Missing 'PowerPoint Document' stream. This may not be a valid PPT file \
                 or may be a different Office format."
                    .to_string(),
            ));
        }

        let mut stream = cfb.open_stream(POWERPOINT_STREAM).map_err(|e| {
            Error::CfbError(format!("Failed to open PowerPoint Document stream: {}", e))
        })?;

        let mut data = Vec::new();
        stream
            .read_to_end(&mut data)
            .map_err(|e| Error::CfbError(format!("Failed to read stream: {}", e)))?;

        Ok(data)
    }
}

impl Default for PptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckReader for PptParser {
    fn read_deck(&self, source: &Source) -> Result<Deck> {
        self.parse(source.open()?)
    }
}

/// One slide of the slide list.
#[derive(Debug, Default)]
struct SlideEntry {
    persist_id: u32,
    placeholders: PlaceholderTexts,
}

/// Parse the PowerPoint Document stream into a deck.
fn parse_stream(data: &[u8]) -> Result<Deck> {
    if data.len() < MIN_STREAM_SIZE {
        return Err(Error::CorruptedFile(format!(
            "PowerPoint Document stream too small ({} bytes). \
             Minimum expected: {} bytes. File may be corrupted or truncated.",
            data.len(),
            MIN_STREAM_SIZE
        )));
    }

    let malformed = count_malformed(data);
    if malformed > MAX_MALFORMED_RECORDS {
        return Err(Error::CorruptedFile(format!(
            "Too many malformed records ({}) detected. File may be corrupted.",
            malformed
        )));
    }

    let document = Records::of(data)
        .find(|(h, _)| h.rec_type == record_types::RT_DOCUMENT && h.is_container())
        .map(|(_, content)| content)
        .ok_or_else(|| {
            Error::PptParseError(
                "No RT_Document record found. This file may use an unsupported \
                 PowerPoint format version (pre-97) or be corrupted."
                    .to_string(),
            )
        })?;

    let mut entries = Vec::new();
    let mut slide_size = None;

    for (header, content) in Records::of(document) {
        match header.rec_type {
            record_types::RT_DOCUMENT_ATOM if content.len() >= 8 => {
                let x = read_u32_le(content, 0) as u64;
                let y = read_u32_le(content, 4) as u64;
                slide_size = Some(SlideSize::from_master_units(x, y));
            }
            record_types::RT_SLIDE_LIST_WITH_TEXT if header.instance == SLIDE_LIST_SLIDES => {
                entries = parse_slide_list(content);
            }
            _ => {}
        }
    }

    let persist = persist_directory(data);
    let slides: Vec<Slide> = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| build_slide(i + 1, entry, data, &persist))
        .collect();

    log::debug!(
        "Parsed {} slides from PPT ({} persist entries)",
        slides.len(),
        persist.len()
    );
    let deck = Deck::new(slides);
    Ok(match slide_size {
        Some(size) => deck.with_slide_size(size),
        None => deck,
    })
}

/// Split a SlideListWithText into slides at each SlidePersistAtom.
fn parse_slide_list(content: &[u8]) -> Vec<SlideEntry> {
    let mut entries: Vec<SlideEntry> = Vec::new();

    for (header, atom) in Records::of(content) {
        if header.rec_type == record_types::RT_SLIDE_PERSIST_ATOM {
            entries.push(SlideEntry {
                persist_id: if atom.len() >= 4 { read_u32_le(atom, 0) } else { 0 },
                ..Default::default()
            });
            continue;
        }

        let Some(entry) = entries.last_mut() else {
            log::warn!("Record 0x{:04X} before the first slide; skipping", header.rec_type);
            continue;
        };
        match header.rec_type {
            record_types::RT_TEXT_HEADER_ATOM if atom.len() >= 4 => {
                entry
                    .placeholders
                    .start(TextType::from_u32(read_u32_le(atom, 0)));
            }
            record_types::RT_TEXT_CHARS_ATOM => entry.placeholders.push_text(decode_utf16(atom)),
            record_types::RT_TEXT_BYTES_ATOM => entry.placeholders.push_text(decode_latin1(atom)),
            _ => {}
        }
    }

    entries
}

/// Persist id to stream offset, from every persist directory in the
/// stream. Later directories override earlier ones.
fn persist_directory(data: &[u8]) -> HashMap<u32, usize> {
    let mut offsets = HashMap::new();

    for (header, content) in Records::of(data) {
        if !matches!(
            header.rec_type,
            record_types::RT_PERSIST_DIRECTORY_ATOM | record_types::RT_PERSIST_PTR_FULL_BLOCK
        ) {
            continue;
        }

        let mut words = content
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]));
        while let Some(info) = words.next() {
            let base = info & 0x000F_FFFF;
            let count = info >> 20;
            for (i, offset) in words.by_ref().take(count as usize).enumerate() {
                offsets.insert(base + i as u32, offset as usize);
            }
        }
    }

    offsets
}

/// The slide's drawing shapes, then any slide list text no shape
/// referenced.
fn build_slide(number: usize, mut entry: SlideEntry, data: &[u8], persist: &HashMap<u32, usize>) -> Slide {
    let mut slide = Slide::new(number);

    match slide_drawing(data, persist, entry.persist_id) {
        Some(drawing) => {
            for shape in drawing_shapes(drawing, &mut entry.placeholders) {
                slide.add_shape(shape);
            }
        }
        None => log::debug!("Slide {} has no drawing; using slide list text", number),
    }

    for text in entry.placeholders.unreferenced() {
        slide.add_shape(Shape::TextFrame(text));
    }
    slide
}

/// The PPDrawing content of the Slide container for `persist_id`.
fn slide_drawing<'a>(data: &'a [u8], persist: &HashMap<u32, usize>, persist_id: u32) -> Option<&'a [u8]> {
    let offset = *persist.get(&persist_id)?;
    let (header, slide) = record_at(data, offset)?;
    if header.rec_type != record_types::RT_SLIDE {
        log::warn!("Persist id {} does not point at a slide", persist_id);
        return None;
    }
    Records::child(slide, record_types::RT_PPDRAWING)
}
