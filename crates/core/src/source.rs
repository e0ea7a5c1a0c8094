//! Re-readable document sources.
//!
//! Slide decks are read twice (once for text, once for rendering), so a
//! source is either a stable path or an owned buffer; never a one-shot
//! stream.

use crate::error::Result;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Anything a parser can read and seek.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Where a document's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on disk.
    Path(PathBuf),
    /// An in-memory copy of the file.
    Bytes(Arc<[u8]>),
}

impl Source {
    /// A source backed by a file path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    /// A source backed by a byte buffer.
    pub fn bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Source::Bytes(bytes.into())
    }

    /// Open a fresh reader positioned at the start. Each call is
    /// independent of earlier ones.
    pub fn open(&self) -> Result<Box<dyn ReadSeek + '_>> {
        match self {
            Source::Path(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            Source::Bytes(bytes) => Ok(Box::new(Cursor::new(&bytes[..]))),
        }
    }

    /// The whole document as bytes, borrowed when already in memory.
    pub fn read_all(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Source::Path(path) => Ok(Cow::Owned(std::fs::read(path)?)),
            Source::Bytes(bytes) => Ok(Cow::Borrowed(&bytes[..])),
        }
    }

    /// The leading bytes of the document, for magic sniffing.
    pub fn header(&self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len);
        self.open()?.take(len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// The file path, when this source has one.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Source::Path(path) => Some(path),
            Source::Bytes(_) => None,
        }
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes.into())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_source_reopens_from_start() {
        let source = Source::from(b"hello world".to_vec());

        let mut first = String::new();
        source.open().unwrap().read_to_string(&mut first).unwrap();
        let mut second = String::new();
        source.open().unwrap().read_to_string(&mut second).unwrap();

        assert_eq!(first, "hello world");
        assert_eq!(first, second);
        assert_eq!(&source.read_all().unwrap()[..], b"hello world");
    }

    #[test]
    fn test_header_is_truncated() {
        let source = Source::bytes(vec![1u8, 2, 3, 4, 5]);
        assert_eq!(source.header(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(source.header(10).unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let source = Source::path("/definitely/not/here.pptx");
        assert!(matches!(source.open(), Err(crate::Error::IoError(_))));
        assert!(source.as_path().is_some());
    }
}
