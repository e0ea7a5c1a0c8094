//! Record headers and sibling iteration for the PPT binary format.
//!
//! PPT document records and Office Drawing (Escher) records share the
//! same 8-byte header, so one walker serves both.

/// Record type constants for the PPT binary format.
pub(crate) mod record_types {
    pub const RT_DOCUMENT: u16 = 0x03E8;
    pub const RT_DOCUMENT_ATOM: u16 = 0x03E9;
    pub const RT_SLIDE: u16 = 0x03EE;
    pub const RT_SLIDE_PERSIST_ATOM: u16 = 0x03F3;
    pub const RT_PPDRAWING: u16 = 0x040C;
    pub const RT_OUTLINE_TEXT_REF_ATOM: u16 = 0x0F9E;
    pub const RT_TEXT_HEADER_ATOM: u16 = 0x0F9F;
    pub const RT_TEXT_CHARS_ATOM: u16 = 0x0FA0;
    pub const RT_TEXT_BYTES_ATOM: u16 = 0x0FA8;
    pub const RT_SLIDE_LIST_WITH_TEXT: u16 = 0x0FF0;
    pub const RT_PERSIST_PTR_FULL_BLOCK: u16 = 0x1771;
    pub const RT_PERSIST_DIRECTORY_ATOM: u16 = 0x1772;
}

/// Office Drawing record types found inside a PPDrawing.
pub(crate) mod escher_types {
    pub const DG_CONTAINER: u16 = 0xF002;
    pub const SPGR_CONTAINER: u16 = 0xF003;
    pub const SP_CONTAINER: u16 = 0xF004;
    pub const SPGR: u16 = 0xF009;
    pub const CLIENT_TEXTBOX: u16 = 0xF00D;
}

/// An 8-byte record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordHeader {
    pub version: u16,
    pub instance: u16,
    pub rec_type: u16,
    pub len: usize,
}

impl RecordHeader {
    pub const SIZE: usize = 8;

    pub fn read(data: &[u8], pos: usize) -> Option<Self> {
        if pos.checked_add(Self::SIZE)? > data.len() {
            return None;
        }
        let ver_instance = read_u16_le(data, pos);
        Some(Self {
            version: ver_instance & 0x0F,
            instance: ver_instance >> 4,
            rec_type: read_u16_le(data, pos + 2),
            len: read_u32_le(data, pos + 4) as usize,
        })
    }

    pub fn is_container(&self) -> bool {
        self.version == 0x0F
    }
}

/// Sibling records within `data[start..end]`: header plus content bytes.
///
/// Stops at the first record that overruns its parent and flags it.
pub(crate) struct Records<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
    pub truncated: bool,
}

impl<'a> Records<'a> {
    pub fn new(data: &'a [u8], start: usize, end: usize) -> Self {
        Self {
            data,
            pos: start,
            end: end.min(data.len()),
            truncated: false,
        }
    }

    /// All records of a byte slice.
    pub fn of(data: &'a [u8]) -> Self {
        Self::new(data, 0, data.len())
    }

    /// The first child of type `rec_type`.
    pub fn child(data: &'a [u8], rec_type: u16) -> Option<&'a [u8]> {
        Self::of(data)
            .find(|(h, _)| h.rec_type == rec_type)
            .map(|(_, content)| content)
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = (RecordHeader, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.truncated || self.pos + RecordHeader::SIZE > self.end {
            return None;
        }
        let header = RecordHeader::read(self.data, self.pos)?;
        let content_start = self.pos + RecordHeader::SIZE;
        let content_end = content_start.checked_add(header.len)?;
        if content_end > self.end {
            self.truncated = true;
            return None;
        }
        self.pos = content_end;
        Some((header, &self.data[content_start..content_end]))
    }
}

/// The record at absolute `offset`, if it fits in `data`.
pub(crate) fn record_at(data: &[u8], offset: usize) -> Option<(RecordHeader, &[u8])> {
    let header = RecordHeader::read(data, offset)?;
    let start = offset + RecordHeader::SIZE;
    let end = start.checked_add(header.len)?;
    data.get(start..end).map(|content| (header, content))
}

/// Count records that overrun their parent, at every nesting level.
pub(crate) fn count_malformed(data: &[u8]) -> usize {
    let mut records = Records::of(data);
    let mut malformed = 0;

    for (header, content) in records.by_ref() {
        if header.is_container() {
            malformed += count_malformed(content);
        }
    }

    if records.truncated {
        malformed += 1;
    }
    malformed
}

/// Decode a TextCharsAtom (UTF-16LE). Paragraph breaks (`\r`) and
/// vertical tabs become newlines.
pub(crate) fn decode_utf16(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]));

    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .take_while(|&c| c != '\0')
        .map(normalize_break)
        .collect()
}

/// Decode a TextBytesAtom: each byte is the low byte of a UTF-16 unit.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| normalize_break(b as char))
        .collect()
}

fn normalize_break(c: char) -> char {
    match c {
        '\r' | '\u{0B}' => '\n',
        c => c,
    }
}

/// Read a little-endian u16 from a byte slice.
pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read a little-endian u32 from a byte slice.
pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
