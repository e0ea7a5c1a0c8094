//! Index records: one per page or slide.

use crate::backend::Tokenizer;
use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::LazyLock;

/// A trailing alphabetic file extension.
static EXTENSION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[a-zA-Z]+$").unwrap());

/// Fields shared by every record of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    /// The filename as given.
    pub doc_name: String,

    /// Coarse tokens of the filename, extension stripped.
    pub title_tokens: String,

    /// Fine-grained tokens of `title_tokens`.
    pub title_small_tokens: String,
}

impl DocumentDescriptor {
    /// Build the descriptor for `filename`.
    pub fn new(filename: &str, tokenizer: &dyn Tokenizer) -> Result<Self> {
        let title = EXTENSION_REGEX.replace(filename, "");
        let title_tokens = tokenizer.tokenize(&title)?;
        let title_small_tokens = tokenizer.fine_grained_tokenize(&title_tokens)?;

        Ok(Self {
            doc_name: filename.to_string(),
            title_tokens,
            title_small_tokens,
        })
    }

    /// A fresh record carrying a copy of this descriptor and `image`.
    /// Body fields start empty.
    pub fn to_record(&self, page_index: usize, image: Vec<u8>) -> Record {
        Record {
            doc_name: self.doc_name.clone(),
            title_tokens: self.title_tokens.clone(),
            title_small_tokens: self.title_small_tokens.clone(),
            image,
            page_index,
            content: String::new(),
            content_tokens: String::new(),
            content_small_tokens: None,
            is_english: false,
        }
    }
}

/// The unit handed to the indexer: one page or slide of one document.
///
/// Field names on the wire follow the index schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "docnm_kwd")]
    pub doc_name: String,

    #[serde(rename = "title_tks")]
    pub title_tokens: String,

    #[serde(rename = "title_sm_tks")]
    pub title_small_tokens: String,

    /// Compressed thumbnail or page image, base64 in serialized form.
    #[serde(serialize_with = "serialize_base64")]
    pub image: Vec<u8>,

    /// 0-based page or slide index within the source document.
    pub page_index: usize,

    #[serde(rename = "content_with_weight")]
    pub content: String,

    #[serde(rename = "content_ltks")]
    pub content_tokens: String,

    /// Only produced on the non-English path.
    #[serde(rename = "content_sm_ltks", skip_serializing_if = "Option::is_none")]
    pub content_small_tokens: Option<String>,

    pub is_english: bool,
}

impl Record {
    /// Fill the body fields from `text`.
    ///
    /// English text gets the tokenizer's English path; other text gets
    /// coarse tokens plus fine-grained ones.
    pub fn tokenize_body(
        mut self,
        text: &str,
        is_english: bool,
        tokenizer: &dyn Tokenizer,
    ) -> Result<Self> {
        self.content = text.to_string();
        self.is_english = is_english;

        if is_english {
            self.content_tokens = tokenizer.tokenize_english(text)?;
            self.content_small_tokens = None;
        } else {
            self.content_tokens = tokenizer.tokenize(text)?;
            self.content_small_tokens = Some(tokenizer.fine_grained_tokenize(&self.content_tokens)?);
        }

        Ok(self)
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}
