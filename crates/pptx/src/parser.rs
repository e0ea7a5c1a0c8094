//! PPTX file parser implementation.

use pagechunk_core::{Deck, DeckReader, Error, Result, Shape, Slide, SlideSize, Source, Table};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Deck> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let presentation = self.read_file_from_archive(&mut archive, PRESENTATION_PATH)?;
        let (slide_ids, slide_size) = parse_presentation(&presentation)?;

        let rels = self.read_file_from_archive(&mut archive, PRESENTATION_RELS_PATH)?;
        let slide_paths = slide_order(&slide_ids, parse_slide_relationships(&rels)?);

        let mut slides = Vec::with_capacity(slide_paths.len());
        for (idx, slide_path) in slide_paths.iter().enumerate() {
            let content = self.read_file_from_archive(&mut archive, slide_path)?;
            let shapes = parse_shape_tree(&content).map_err(|e| match e {
                Error::XmlError(msg) => Error::XmlError(format!("{}: {}", slide_path, msg)),
                Error::PptxParseError(msg) => {
                    Error::PptxParseError(format!("{}: {}", slide_path, msg))
                }
                other => other,
            })?;
            slides.push(Slide {
                number: idx + 1,
                shapes,
            });
        }
        log::debug!("Parsed {} slides from PPTX", slides.len());

        let deck = Deck::new(slides);
        Ok(match slide_size {
            Some(size) => deck.with_slide_size(size),
            None => deck,
        })
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckReader for PptxParser {
    fn read_deck(&self, source: &Source) -> Result<Deck> {
        self.parse(source.open()?)
    }
}

/// Slide relationship ids in `p:sldIdLst` order, and the `p:sldSz`
/// canvas size.
fn parse_presentation(xml: &str) -> Result<(Vec<String>, Option<SlideSize>)> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut ids = Vec::new();
    let mut size = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"sldId" => {
                    // the relationship id is the prefixed `r:id`, not the numeric `id`
                    if let Some(id) = e.attributes().flatten().find_map(|attr| {
                        let key = attr.key.as_ref();
                        (key != b"id" && local_name(key) == b"id")
                            .then(|| String::from_utf8_lossy(&attr.value).to_string())
                    }) {
                        ids.push(id);
                    }
                }
                b"sldSz" => {
                    let cx = attribute_u64(e, b"cx");
                    let cy = attribute_u64(e, b"cy");
                    if let (Some(cx), Some(cy)) = (cx, cy) {
                        size = Some(SlideSize::from_emu(cx, cy));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok((ids, size))
}

/// Slide relationships: id → archive path.
fn parse_slide_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut slides = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"Relationship" => {
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut id = String::new();

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Type" => rel_type = value,
                        b"Target" => target = value,
                        b"Id" => id = value,
                        _ => {}
                    }
                }

                if rel_type.ends_with("/slide") {
                    let full_path = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("ppt/{}", target),
                    };
                    slides.insert(id, full_path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(slides)
}

/// Order slide paths by the presentation's slide id list. Slides missing
/// from the list (or a deck with no list) fall back to numeric order.
fn slide_order(ids: &[String], mut rels: HashMap<String, String>) -> Vec<String> {
    let mut ordered: Vec<String> = ids.iter().filter_map(|id| rels.remove(id)).collect();

    let mut rest: Vec<(String, String)> = rels.into_iter().collect();
    if !rest.is_empty() {
        log::warn!("{} slide relationships are not in the slide list", rest.len());
    }
    rest.sort_by(|a, b| {
        let na = extract_slide_number(&a.1).or_else(|| extract_slide_number(&a.0));
        let nb = extract_slide_number(&b.1).or_else(|| extract_slide_number(&b.0));
        match (na, nb) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.1.cmp(&b.1),
        }
    });
    ordered.extend(rest.into_iter().map(|(_, path)| path));
    ordered
}

/// Parse the top-level shapes of a slide's `p:spTree`.
fn parse_shape_tree(xml: &str) -> Result<Vec<Shape>> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"spTree" => {
                return parse_shapes(&mut reader, b"spTree");
            }
            Ok(Event::Eof) => return Ok(Vec::new()),
            Err(e) => return Err(xml_error(e)),
            _ => {}
        }
    }
}

/// Parse sibling shapes until the closing tag `end`.
fn parse_shapes(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<Vec<Shape>> {
    let mut shapes = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"sp" => shapes.push(parse_text_shape(reader)?),
                b"grpSp" => shapes.push(Shape::Group(parse_shapes(reader, b"grpSp")?)),
                b"graphicFrame" => shapes.push(parse_graphic_frame(reader)?),
                b"pic" | b"cxnSp" | b"contentPart" => {
                    reader.read_to_end(e.name()).map_err(xml_error)?;
                    shapes.push(Shape::Other);
                }
                // group properties, alternate content, extensions
                _ => {
                    reader.read_to_end(e.name()).map_err(xml_error)?;
                }
            },
            Event::End(e) if local_name(e.name().as_ref()) == end => break,
            Event::Eof => return Err(unexpected_eof(end)),
            _ => {}
        }
    }

    Ok(shapes)
}

/// A `p:sp`: a text frame if it has a text body, otherwise nothing.
fn parse_text_shape(reader: &mut Reader<&[u8]>) -> Result<Shape> {
    Ok(match read_text_body(reader, b"sp")? {
        Some(text) => Shape::TextFrame(text),
        None => Shape::Other,
    })
}

/// A `p:graphicFrame`: a table if it holds `a:tbl`; charts, diagrams
/// and OLE objects count as other.
fn parse_graphic_frame(reader: &mut Reader<&[u8]>) -> Result<Shape> {
    let mut table = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) if local_name(e.name().as_ref()) == b"tbl" => {
                table = Some(parse_table(reader)?);
            }
            Event::End(e) if local_name(e.name().as_ref()) == b"graphicFrame" => break,
            Event::Eof => return Err(unexpected_eof(b"graphicFrame")),
            _ => {}
        }
    }

    Ok(table.map_or(Shape::Other, Shape::Table))
}

/// An `a:tbl`: grid columns, then rows of cells. Merge continuation
/// cells are absent.
fn parse_table(reader: &mut Reader<&[u8]>) -> Result<Table> {
    let mut columns = 0;
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"gridCol" => columns += 1,
                b"tr" => rows.push(Vec::new()),
                b"tc" => {
                    let merged = is_merge_continuation(&e);
                    let text = read_text_body(reader, b"tc")?;
                    if let Some(row) = rows.last_mut() {
                        row.push((!merged).then(|| text.unwrap_or_default()));
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match local_name(e.name().as_ref()) {
                b"gridCol" => columns += 1,
                b"tr" => rows.push(Vec::new()),
                b"tc" => {
                    if let Some(row) = rows.last_mut() {
                        row.push((!is_merge_continuation(&e)).then(String::new));
                    }
                }
                _ => {}
            },
            Event::End(e) if local_name(e.name().as_ref()) == b"tbl" => break,
            Event::Eof => return Err(unexpected_eof(b"tbl")),
            _ => {}
        }
    }

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row);
    }
    Ok(table)
}

/// Read the text body inside the element closing with `end`.
///
/// Paragraphs are joined with newlines; line breaks inside a paragraph
/// become newlines too. Returns `None` when there is no `txBody`.
fn read_text_body(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<Option<String>> {
    let mut paragraphs: Option<Vec<String>> = None;
    let mut in_run_text = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"txBody" => paragraphs = Some(Vec::new()),
                b"p" => {
                    if let Some(paragraphs) = paragraphs.as_mut() {
                        paragraphs.push(String::new());
                    }
                }
                b"t" => in_run_text = true,
                _ => {}
            },
            Event::Empty(e) => match local_name(e.name().as_ref()) {
                b"txBody" => paragraphs = Some(Vec::new()),
                b"p" => {
                    if let Some(paragraphs) = paragraphs.as_mut() {
                        paragraphs.push(String::new());
                    }
                }
                b"br" => {
                    if let Some(last) = paragraphs.as_mut().and_then(|p| p.last_mut()) {
                        last.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_run_text => {
                if let Some(last) = paragraphs.as_mut().and_then(|p| p.last_mut()) {
                    let text = t.unescape().unwrap_or_default();
                    last.push_str(&text);
                }
            }
            Event::End(e) => {
                let name = e.name();
                let name = local_name(name.as_ref());
                if name == b"t" {
                    in_run_text = false;
                } else if name == end {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof(end)),
            _ => {}
        }
    }

    Ok(paragraphs.map(|p| p.join("\n")))
}

/// Whether a table cell continues a horizontal or vertical merge.
fn is_merge_continuation(cell: &BytesStart) -> bool {
    cell.attributes().flatten().any(|attr| {
        matches!(attr.key.as_ref(), b"hMerge" | b"vMerge")
            && matches!(attr.value.as_ref(), b"1" | b"true")
    })
}

fn attribute_u64(e: &BytesStart, key: &[u8]) -> Option<u64> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| String::from_utf8_lossy(&attr.value).parse().ok())
}

fn xml_error(e: quick_xml::Error) -> Error {
    Error::XmlError(e.to_string())
}

fn unexpected_eof(inside: &[u8]) -> Error {
    Error::PptxParseError(format!(
        "unexpected end of document inside <{}>",
        String::from_utf8_lossy(inside)
    ))
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
