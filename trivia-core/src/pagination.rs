//! Offset pagination over ordered record sequences.
//!
//! # Example
//!
//! ```
//! use trivia_core::pagination::{paginate, parse_page};
//!
//! let ids: Vec<u32> = (1..=25).collect();
//! let page = parse_page(Some("3"));
//! assert_eq!(paginate(&ids, page, 10), &[21, 22, 23, 24, 25]);
//!
//! // Bad input degrades to the first page
//! assert_eq!(parse_page(Some("abc")), 1);
//! assert_eq!(parse_page(Some("-2")), 1);
//! assert_eq!(parse_page(None), 1);
//! ```

/// Number of questions returned per page unless configured otherwise.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Parse a 1-indexed page number from raw query input.
///
/// Absent, non-numeric, zero and negative values all yield page 1.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&page| page > 0)
        .unwrap_or(1)
}

/// Slice `items` to the `page`-th window of `page_size` records.
///
/// Page 0 is treated as page 1. Returns an empty slice when the window starts
/// past the end of `items`. Never panics.
#[must_use]
pub fn paginate<T>(items: &[T], page: u32, page_size: usize) -> &[T] {
    let page = page.max(1) as usize;
    let start = (page - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// One page of records plus the information needed to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Page<T> {
    /// Records on this page, in store order.
    pub items: Vec<T>,
    /// 1-indexed page number that was requested.
    pub page: u32,
    /// Maximum number of records per page.
    pub page_size: usize,
    /// Number of records across all pages.
    pub total: usize,
}

impl<T: Clone> Page<T> {
    /// Cut a page out of the full ordered result set.
    #[must_use]
    pub fn from_all(all: &[T], page: u32, page_size: usize) -> Self {
        Self {
            items: paginate(all, page, page_size).to_vec(),
            page: page.max(1),
            page_size,
            total: all.len(),
        }
    }
}

impl<T> Page<T> {
    /// Whether this page holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let items: Vec<i32> = (0..25).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
    }

    #[test]
    fn test_last_partial_page() {
        let items: Vec<i32> = (0..25).collect();
        assert_eq!(paginate(&items, 3, 10), &items[20..25]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items: Vec<i32> = (0..10).collect();
        assert!(paginate(&items, 2, 10).is_empty());
        assert!(paginate(&items, 1000, 10).is_empty());
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let items: Vec<i32> = (0..5).collect();
        assert_eq!(paginate(&items, 0, 2), &[0, 1]);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let items: Vec<i32> = (0..5).collect();
        assert!(paginate(&items, u32::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<i32> = Vec::new();
        assert!(paginate(&items, 1, 10).is_empty());
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(Some("2")), 2);
        assert_eq!(parse_page(Some(" 7 ")), 7);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-1")), 1);
        assert_eq!(parse_page(Some("1.5")), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(None), 1);
    }

    #[test]
    fn test_page_metadata() {
        let items: Vec<i32> = (0..25).collect();
        let last = Page::from_all(&items, 3, 10);
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.total, 25);
        assert_eq!(last.page_size, 10);
        assert_eq!(Page::from_all(&items, 0, 10).page, 1);
        assert!(Page::from_all(&items, 4, 10).is_empty());
    }
}
