//! A dependency-free default tokenizer.
//!
//! Good enough for the CLI and for tests. Production indexing plugs in
//! its own [`Tokenizer`] with stemming and dictionary segmentation.

use crate::backend::Tokenizer;
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// One CJK character, or a run of other letters and digits.
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\p{Han}\p{Hiragana}\p{Katakana}]|[[\p{L}\p{N}]--[\p{Han}\p{Hiragana}\p{Katakana}]]+",
    )
    .unwrap()
});

/// A hyphen joining two lower-case letters ("e-mail").
static HYPHEN_JOIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])-([a-z])").unwrap());

/// Letter runs and digit runs.
static LETTER_OR_DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+|\p{N}+").unwrap());

/// NFKC + lower-case word splitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        Self
    }

    fn normalize(text: &str) -> String {
        text.nfkc().collect::<String>().to_lowercase()
    }

    fn words(text: &str) -> String {
        WORD_REGEX
            .find_iter(text)
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Result<String> {
        Ok(Self::words(&Self::normalize(text)))
    }

    fn fine_grained_tokenize(&self, tokens: &str) -> Result<String> {
        let fine: Vec<&str> = tokens
            .split_whitespace()
            .flat_map(|token| LETTER_OR_DIGIT_RUN_REGEX.find_iter(token).map(|m| m.as_str()))
            .collect();
        Ok(fine.join(" "))
    }

    fn tokenize_english(&self, text: &str) -> Result<String> {
        let text = Self::normalize(text);
        let joined = HYPHEN_JOIN_REGEX.replace_all(&text, "$1$2");
        Ok(Self::words(&joined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words() {
        let t = SimpleTokenizer::new();
        assert_eq!(t.tokenize("Quarterly Report, 2024!").unwrap(), "quarterly report 2024");
    }

    #[test]
    fn test_tokenize_cjk_per_character() {
        let t = SimpleTokenizer::new();
        assert_eq!(t.tokenize("营业收入 Q3").unwrap(), "营 业 收 入 q3");
    }

    #[test]
    fn test_tokenize_nfkc() {
        let t = SimpleTokenizer::new();
        // full-width letters fold to ASCII
        assert_eq!(t.tokenize("ＡＢＣ").unwrap(), "abc");
    }

    #[test]
    fn test_english_joins_hyphenated_words() {
        let t = SimpleTokenizer::new();
        assert_eq!(t.tokenize_english("E-mail follow-up").unwrap(), "email followup");
        assert_eq!(t.tokenize("E-mail").unwrap(), "e mail");
    }

    #[test]
    fn test_fine_grained_splits_letter_digit_runs() {
        let t = SimpleTokenizer::new();
        assert_eq!(t.fine_grained_tokenize("covid19 report q3").unwrap(), "covid 19 report q 3");
    }
}
