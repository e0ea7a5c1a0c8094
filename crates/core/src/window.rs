//! Half-open page windows.

use serde::{Deserialize, Serialize};

/// Default upper bound when the caller gives none.
pub const DEFAULT_TO_PAGE: usize = 100_000;

/// A half-open range `[from_page, to_page)` of 0-based page or slide
/// indices.
///
/// Bounds past the end of a document clamp the way slicing does:
/// `to_page` shrinks to the total and an out-of-range `from_page`
/// selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub from_page: usize,
    pub to_page: usize,
}

impl PageWindow {
    /// Create a window.
    pub fn new(from_page: usize, to_page: usize) -> Self {
        Self { from_page, to_page }
    }

    /// Keep the starting page, lift the upper bound.
    pub fn with_to_page(self, to_page: usize) -> Self {
        Self { to_page, ..self }
    }

    /// The upper bound clamped to the document size.
    pub fn clamped_end(&self, total: usize) -> usize {
        self.to_page.min(total)
    }

    /// Concrete index range within a document of `total` pages.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let end = self.clamped_end(total);
        let start = self.from_page.min(end);
        start..end
    }

    /// Number of pages selected within a document of `total` pages.
    pub fn len_within(&self, total: usize) -> usize {
        self.range(total).len()
    }

    /// The selected part of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(0, DEFAULT_TO_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_inside_document() {
        let pages = [0, 1, 2, 3, 4];
        assert_eq!(PageWindow::new(1, 3).slice(&pages), &[1, 2]);
    }

    #[test]
    fn test_to_page_clamps() {
        let pages = [0, 1, 2];
        assert_eq!(PageWindow::new(1, 100).slice(&pages), &[1, 2]);
        assert_eq!(PageWindow::default().slice(&pages), &[0, 1, 2]);
        assert_eq!(PageWindow::new(0, 100).clamped_end(3), 3);
    }

    #[test]
    fn test_from_page_past_end_is_empty() {
        let pages = [0, 1, 2];
        assert!(PageWindow::new(5, 10).slice(&pages).is_empty());
        assert_eq!(PageWindow::new(5, 10).len_within(3), 0);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let pages = [0, 1, 2, 3];
        assert!(PageWindow::new(3, 1).slice(&pages).is_empty());
    }

    #[test]
    fn test_with_to_page_keeps_start() {
        let w = PageWindow::new(2, 4).with_to_page(1_000_000);
        assert_eq!(w, PageWindow::new(2, 1_000_000));
    }
}
