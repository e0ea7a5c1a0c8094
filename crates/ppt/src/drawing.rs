//! Slide shape trees from a slide's PPDrawing.
//!
//! The drawing holds an Office Drawing tree: a DgContainer whose root
//! SpgrContainer lists the slide's shapes. Each SpContainer is one shape
//! and each nested SpgrContainer is a group. A shape's text lives in its
//! ClientTextbox, either inline as text atoms or, for placeholders, as an
//! OutlineTextRefAtom pointing into the slide list's text.

use crate::record::{escher_types, read_u32_le, record_types, Records};
use crate::record::{decode_latin1, decode_utf16};
use crate::text::{PlaceholderTexts, TextType};
use pagechunk_core::Shape;

/// The top-level shapes of a PPDrawing's content.
pub(crate) fn drawing_shapes(drawing: &[u8], placeholders: &mut PlaceholderTexts) -> Vec<Shape> {
    Records::child(drawing, escher_types::DG_CONTAINER)
        .and_then(|dg| Records::child(dg, escher_types::SPGR_CONTAINER))
        .map(|root| group_children(root, placeholders))
        .unwrap_or_default()
}

/// Shapes of one SpgrContainer. Its own SpContainer (the one holding the
/// Spgr atom) describes the group itself and is skipped.
fn group_children(group: &[u8], placeholders: &mut PlaceholderTexts) -> Vec<Shape> {
    Records::of(group)
        .filter_map(|(header, content)| match header.rec_type {
            escher_types::SP_CONTAINER if Records::child(content, escher_types::SPGR).is_some() => {
                None
            }
            escher_types::SP_CONTAINER => Some(shape(content, placeholders)),
            escher_types::SPGR_CONTAINER => Some(Shape::Group(group_children(content, placeholders))),
            _ => None,
        })
        .collect()
}

/// One SpContainer: a text frame when its textbox carries slide text.
fn shape(container: &[u8], placeholders: &mut PlaceholderTexts) -> Shape {
    Records::child(container, escher_types::CLIENT_TEXTBOX)
        .and_then(|textbox| textbox_text(textbox, placeholders))
        .map_or(Shape::Other, Shape::TextFrame)
}

/// The text of a ClientTextbox, `None` when it is empty or not shown on
/// the slide.
fn textbox_text(textbox: &[u8], placeholders: &mut PlaceholderTexts) -> Option<String> {
    let mut text_type = TextType::Other;
    let mut parts = Vec::new();

    for (header, content) in Records::of(textbox) {
        match header.rec_type {
            record_types::RT_TEXT_HEADER_ATOM if content.len() >= 4 => {
                text_type = TextType::from_u32(read_u32_le(content, 0));
            }
            record_types::RT_TEXT_CHARS_ATOM => parts.push(decode_utf16(content)),
            record_types::RT_TEXT_BYTES_ATOM => parts.push(decode_latin1(content)),
            record_types::RT_OUTLINE_TEXT_REF_ATOM if content.len() >= 4 => {
                if let Some((ref_type, text)) = placeholders.take(read_u32_le(content, 0) as usize) {
                    text_type = ref_type;
                    parts.push(text.to_string());
                }
            }
            _ => {}
        }
    }

    let text = parts.join("\n");
    (text_type.is_slide_content() && !text.trim().is_empty()).then_some(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::record::tests::{atom, chars, container, text_header};

    pub(crate) fn textbox(children: &[Vec<u8>]) -> Vec<u8> {
        container(
            escher_types::SP_CONTAINER,
            0,
            &[container(escher_types::CLIENT_TEXTBOX, 0, children)],
        )
    }

    pub(crate) fn group(children: &[Vec<u8>]) -> Vec<u8> {
        let mut all = vec![container(
            escher_types::SP_CONTAINER,
            0,
            &[atom(escher_types::SPGR, 1, &[0; 16])],
        )];
        all.extend_from_slice(children);
        container(escher_types::SPGR_CONTAINER, 0, &all)
    }

    pub(crate) fn drawing(shapes: &[Vec<u8>]) -> Vec<u8> {
        container(escher_types::DG_CONTAINER, 0, &[group(shapes)])
    }

    pub(crate) fn outline_ref(index: u32) -> Vec<u8> {
        atom(record_types::RT_OUTLINE_TEXT_REF_ATOM, 0, &index.to_le_bytes())
    }

    fn placeholders() -> PlaceholderTexts {
        let mut texts = PlaceholderTexts::default();
        texts.start(TextType::Title);
        texts.push_text("Quarterly review".to_string());
        texts.start(TextType::Body);
        texts.push_text("Revenue up".to_string());
        texts
    }

    #[test]
    fn test_free_textbox_and_groups() {
        let drawing = drawing(&[
            textbox(&[text_header(4), chars("Free text")]),
            group(&[
                textbox(&[text_header(4), chars("Left")]),
                textbox(&[text_header(4), chars("Right")]),
            ]),
            container(escher_types::SP_CONTAINER, 0, &[atom(0xF00A, 0, &[0; 8])]),
        ]);

        let shapes = drawing_shapes(&drawing, &mut PlaceholderTexts::default());
        assert_eq!(
            shapes,
            vec![
                Shape::TextFrame("Free text".to_string()),
                Shape::Group(vec![
                    Shape::TextFrame("Left".to_string()),
                    Shape::TextFrame("Right".to_string()),
                ]),
                Shape::Other,
            ]
        );
    }

    #[test]
    fn test_placeholder_refs_resolve_slide_list_text() {
        let mut texts = placeholders();
        let drawing = drawing(&[textbox(&[outline_ref(1)])]);

        let shapes = drawing_shapes(&drawing, &mut texts);
        assert_eq!(shapes, vec![Shape::TextFrame("Revenue up".to_string())]);

        let rest: Vec<String> = texts.unreferenced().collect();
        assert_eq!(rest, vec!["Quarterly review"]);
    }

    #[test]
    fn test_notes_textbox_is_not_slide_text() {
        let drawing = drawing(&[textbox(&[text_header(2), chars("Speaker notes")])]);
        let shapes = drawing_shapes(&drawing, &mut PlaceholderTexts::default());
        assert_eq!(shapes, vec![Shape::Other]);
    }

    #[test]
    fn test_drawing_without_shape_tree() {
        let shapes = drawing_shapes(&[0u8; 4], &mut PlaceholderTexts::default());
        assert!(shapes.is_empty());
    }
}
