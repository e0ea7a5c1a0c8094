//! PPTX (Office Open XML) deck reader.
//!
//! Parses .pptx files, which are ZIP archives of XML parts, into slide
//! shape trees: text bodies, tables, and nested groups.

pub mod parser;

pub use parser::PptxParser;
