//! Text types and the per-slide placeholder text of the slide list.

/// Text types from RT_TextHeaderAtom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextType {
    Title,
    Body,
    Notes,
    NotUsed,
    Other,
    CenterBody,
    CenterTitle,
    HalfBody,
    QuarterBody,
}

impl TextType {
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => TextType::Title,
            1 => TextType::Body,
            2 => TextType::Notes,
            3 => TextType::NotUsed,
            5 => TextType::CenterBody,
            6 => TextType::CenterTitle,
            7 => TextType::HalfBody,
            8 => TextType::QuarterBody,
            _ => TextType::Other,
        }
    }

    /// Whether text of this type is shown on the slide itself.
    pub fn is_slide_content(&self) -> bool {
        !matches!(self, TextType::Notes | TextType::NotUsed)
    }
}

#[derive(Debug)]
struct Placeholder {
    text_type: TextType,
    text: String,
    referenced: bool,
}

/// Text blocks of one slide in SlideListWithText, indexed the way
/// OutlineTextRefAtoms address them: one block per TextHeaderAtom.
#[derive(Debug, Default)]
pub(crate) struct PlaceholderTexts {
    blocks: Vec<Placeholder>,
}

impl PlaceholderTexts {
    /// Open a new block.
    pub fn start(&mut self, text_type: TextType) {
        self.blocks.push(Placeholder {
            text_type,
            text: String::new(),
            referenced: false,
        });
    }

    /// Append decoded text to the current block, opening a body block
    /// when no header came first.
    pub fn push_text(&mut self, text: String) {
        if self.blocks.is_empty() {
            self.start(TextType::Body);
        }
        if let Some(block) = self.blocks.last_mut() {
            if !block.text.is_empty() {
                block.text.push('\n');
            }
            block.text.push_str(&text);
        }
    }

    /// Resolve a reference from the drawing, marking the block used.
    pub fn take(&mut self, index: usize) -> Option<(TextType, &str)> {
        let block = self.blocks.get_mut(index)?;
        block.referenced = true;
        Some((block.text_type, block.text.as_str()))
    }

    /// Slide text no drawing shape referenced, in slide list order.
    pub fn unreferenced(&self) -> impl Iterator<Item = String> + '_ {
        self.blocks
            .iter()
            .filter(|b| !b.referenced && b.text_type.is_slide_content() && !b.text.trim().is_empty())
            .map(|b| b.text.clone())
    }
}
