//! Legacy PPT (OLE/CFB) deck reader.
//!
//! Parses .ppt files, which use the Microsoft Compound File Binary (CFB)
//! format. Slides come from the document's slide list; each slide's
//! shapes come from its drawing, with placeholder text resolved from the
//! slide list.

mod drawing;
pub mod parser;
mod record;
mod text;

pub use parser::PptParser;
