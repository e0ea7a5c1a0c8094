//! Noise filter for OCR/layout text.
//!
//! Layout extraction over page documents yields many short numeric
//! artifacts (page numbers, bullet glyphs, table rulers). Lines that look
//! like that are dropped before indexing.

use regex::Regex;
use std::sync::LazyLock;

/// A line made only of digits and number punctuation.
static NUMERIC_ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9.,%/-]+$").unwrap());

/// Lines shorter than this (after trimming) are noise.
const MIN_TEXT_CHARS: usize = 3;

/// Whether a line of extracted text is discardable.
///
/// True for bare numbers, dates, and percentages, and for anything
/// shorter than three characters once lower-cased and trimmed.
pub fn is_garbage(text: &str) -> bool {
    let text = text.to_lowercase();
    let text = text.trim();

    if NUMERIC_ONLY_REGEX.is_match(text) {
        return true;
    }

    text.chars().count() < MIN_TEXT_CHARS
}
