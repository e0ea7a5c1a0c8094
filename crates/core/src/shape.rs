//! Turning a slide's shape tree into linear text.
//!
//! Text frames are returned verbatim. Slide text is not passed through
//! the noise filter; only the page-document path filters.

use crate::types::{Shape, Slide, Table};

/// Extract the text of one shape, recursing into groups.
///
/// Returns `None` for shapes that contribute nothing, including tables
/// with no data rows.
pub fn extract(shape: &Shape) -> Option<String> {
    match shape {
        Shape::Table(table) => linearize_table(table),
        Shape::TextFrame(text) => Some(text.clone()),
        Shape::Group(children) => Some(join_non_empty(children.iter().filter_map(extract))),
        Shape::Other => None,
    }
}

/// The text of a whole slide: its top-level shape texts, newline-joined,
/// with empty ones left out. A slide without text yields `""`.
pub fn slide_text(slide: &Slide) -> String {
    join_non_empty(slide.shapes.iter().filter_map(extract))
}

/// One line per data row, `"header: cell"` pairs joined by `"; "`.
///
/// Absent cells are skipped. A row whose cells are all absent still
/// produces an (empty) line.
fn linearize_table(table: &Table) -> Option<String> {
    if table.row_count() < 2 {
        return None;
    }

    let rows: Vec<String> = (1..table.row_count())
        .map(|i| {
            (0..table.column_count())
                .filter_map(|j| {
                    table
                        .cell(i, j)
                        .map(|cell| format!("{}: {}", table.cell(0, j).unwrap_or(""), cell))
                })
                .collect::<Vec<_>>()
                .join("; ")
        })
        .collect();

    Some(rows.join("\n"))
}

fn join_non_empty(texts: impl Iterator<Item = String>) -> String {
    texts
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Shape {
        Shape::TextFrame(s.to_string())
    }

    #[test]
    fn test_table_linearization() {
        let table = Table::from_rows([["Name", "Age"], ["Alice", "30"]]);
        assert_eq!(
            extract(&Shape::Table(table)),
            Some("Name: Alice; Age: 30".to_string())
        );
    }

    #[test]
    fn test_table_multiple_rows() {
        let table = Table::from_rows([["City", "Pop"], ["Oslo", "700k"], ["Bergen", "290k"]]);
        assert_eq!(
            extract(&Shape::Table(table)).unwrap(),
            "City: Oslo; Pop: 700k\nCity: Bergen; Pop: 290k"
        );
    }

    #[test]
    fn test_table_skips_absent_cells() {
        let mut table = Table::new(3);
        table.push_row(vec![Some("A".into()), Some("B".into()), Some("C".into())]);
        table.push_row(vec![Some("1".into()), None, Some("3".into())]);
        table.push_row(vec![None, None, None]);

        assert_eq!(extract(&Shape::Table(table)).unwrap(), "A: 1; C: 3\n");
    }

    #[test]
    fn test_table_header_only_is_none() {
        let table = Table::from_rows([["Name", "Age"]]);
        assert_eq!(extract(&Shape::Table(table)), None);
        assert_eq!(extract(&Shape::Table(Table::new(0))), None);
    }

    #[test]
    fn test_text_frame_is_verbatim() {
        assert_eq!(extract(&text("  Title \n")), Some("  Title \n".to_string()));
        assert_eq!(extract(&text("12")), Some("12".to_string()));
    }

    #[test]
    fn test_group_flattening() {
        let group = Shape::Group(vec![text("A"), text("B"), text("")]);
        assert_eq!(extract(&group), Some("A\nB".to_string()));
    }

    #[test]
    fn test_nested_groups() {
        let inner = Shape::Group(vec![text("inner"), Shape::Other]);
        let table = Table::from_rows([["k", "v"], ["x", "1"]]);
        let outer = Shape::Group(vec![text("outer"), inner, Shape::Table(table)]);

        assert_eq!(extract(&outer).unwrap(), "outer\ninner\nk: x; v: 1");
    }

    #[test]
    fn test_other_contributes_nothing() {
        assert_eq!(extract(&Shape::Other), None);
        assert_eq!(extract(&Shape::Group(vec![Shape::Other])), Some(String::new()));
    }

    #[test]
    fn test_slide_text_composition() {
        let mut slide = Slide::new(1);
        slide.add_shape(text("Quarterly results"));
        slide.add_shape(Shape::Other);
        slide.add_shape(text(""));
        slide.add_shape(Shape::Group(vec![text("Revenue up")]));

        assert_eq!(slide_text(&slide), "Quarterly results\nRevenue up");
    }

    #[test]
    fn test_empty_slide_yields_empty_string() {
        let mut slide = Slide::new(3);
        slide.add_shape(Shape::Other);
        assert_eq!(slide_text(&slide), "");
        assert_eq!(slide_text(&Slide::new(4)), "");
    }
}
