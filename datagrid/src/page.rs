//! Pagination engine.

use std::ops::Range;

/// Index range of a page within a sequence of `len` items.
///
/// Clamped like slice bounds: a page past the end is an empty range.
pub fn page_range(len: usize, page_index: usize, page_size: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Returns the items of one page.
///
/// Equivalent to `items[page_index * page_size..][..page_size]` with both
/// bounds clamped, so out-of-range pages are empty rather than an error.
pub fn paginate<X>(items: &[X], page_index: usize, page_size: usize) -> &[X] {
    &items[page_range(items.len(), page_index, page_size)]
}

/// Pagination information for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Zero-based page index.
    pub page_index: usize,
    /// Maximum items per page.
    pub page_size: usize,
    /// Items in the paginated sequence.
    pub total_items: usize,
    /// Number of pages (0 when there are no items).
    pub page_count: usize,
    /// Index of the first item on this page.
    pub start: usize,
    /// One past the last item on this page.
    pub end: usize,
}

impl PageInfo {
    /// Computes page information.
    pub fn new(page_index: usize, page_size: usize, total_items: usize) -> Self {
        let range = page_range(total_items, page_index, page_size);
        let page_count = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            page_index,
            page_size,
            total_items,
            page_count,
            start: range.start,
            end: range.end,
        }
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.page_count
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this page shows no items.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Status line, e.g. `"1-25 of 60"`.
    pub fn status_text(&self) -> String {
        if self.is_empty() {
            format!("0 of {}", self.total_items)
        } else {
            format!("{}-{} of {}", self.start + 1, self.end, self.total_items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_matches_slice() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 0, 10), &items[0..10]);
        assert_eq!(paginate(&items, 2, 10), &items[20..25]);
        assert!(paginate(&items, 3, 10).is_empty());
        assert!(paginate(&items, usize::MAX, 10).is_empty());
    }

    #[test]
    fn test_page_info() {
        let info = PageInfo::new(1, 10, 25);
        assert_eq!(info.page_count, 3);
        assert_eq!((info.start, info.end), (10, 20));
        assert!(info.has_previous());
        assert!(info.has_next());
        assert_eq!(info.status_text(), "11-20 of 25");

        let last = PageInfo::new(2, 10, 25);
        assert!(!last.has_next());
        assert_eq!(last.len(), 5);
    }

    #[test]
    fn test_page_info_empty() {
        let info = PageInfo::new(0, 10, 0);
        assert_eq!(info.page_count, 0);
        assert!(info.is_empty());
        assert!(!info.has_next());
        assert_eq!(info.status_text(), "0 of 0");
    }
}
