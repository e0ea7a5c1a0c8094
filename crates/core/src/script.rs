//! Coarse script classification of extracted text.

use regex::Regex;
use std::sync::LazyLock;

/// Text that opens with a run of at least two Latin letters.
static LATIN_LEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{2,}").unwrap());

/// Share of texts that must look Latin for the whole set to count.
const ENGLISH_RATIO: f64 = 0.8;

/// Whether a set of texts is written in a Latin/English-like script.
///
/// A text counts when its trimmed form starts with two ASCII letters.
/// An empty set is not English.
pub fn is_english<S: AsRef<str>>(texts: &[S]) -> bool {
    if texts.is_empty() {
        return false;
    }

    let latin = texts
        .iter()
        .filter(|t| LATIN_LEAD_REGEX.is_match(t.as_ref().trim()))
        .count();

    latin as f64 / texts.len() as f64 > ENGLISH_RATIO
}
