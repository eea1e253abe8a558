//! Client-side pagination over an already-fetched collection.
//!
//! Pages are 1-indexed. The page count is never below one, so an empty
//! collection still has a (blank) first page. Requests for a page outside
//! `1..=total_pages` are ignored rather than clamped.

/// Number of pages needed to show `len` items, `page_size` per page.
///
/// A zero `page_size` is treated as one.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// The items visible on `page` (1-indexed).
///
/// Returns an empty slice for page zero or a page past the end.
#[must_use]
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let Some(start) = page.checked_sub(1).map(|p| p.saturating_mul(page_size)) else {
        return &[];
    };
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Current-page state for one listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// Page size used by listings that don't pick their own.
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Start on page one with the given page size (minimum one).
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// The current page (1-indexed).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page count for a collection of `len` items.
    #[must_use]
    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Move to `page` if it exists for a collection of `len` items.
    ///
    /// Returns whether the page changed. Out-of-range requests leave the
    /// current page untouched.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page == 0 || page > self.total_pages(len) {
            return false;
        }
        self.page = page;
        true
    }

    /// Advance one page if there is one.
    pub fn next(&mut self, len: usize) -> bool {
        self.go_to(self.page + 1, len)
    }

    /// Go back one page if there is one.
    pub fn previous(&mut self, len: usize) -> bool {
        self.go_to(self.page.saturating_sub(1), len)
    }

    /// The slice of `items` visible on the current page.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_window(items, self.page, self.page_size)
    }

    /// 1-indexed position of the first visible item, for "showing X–Y of Z".
    #[must_use]
    pub fn first_position(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thirteen() -> Vec<u32> {
        (1..=13).collect()
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(13, 6), 3);
        assert_eq!(total_pages(12, 6), 2);
        assert_eq!(total_pages(0, 6), 1);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_out_of_range_pages_are_ignored() {
        let items = thirteen();
        let mut pager = Paginator::new(6);

        assert!(!pager.go_to(0, items.len()));
        assert_eq!(pager.page(), 1);
        assert!(!pager.go_to(4, items.len()));
        assert_eq!(pager.page(), 1);

        assert!(pager.go_to(3, items.len()));
        assert!(!pager.next(items.len()));
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn test_second_page_window() {
        let items = thirteen();
        let mut pager = Paginator::new(6);
        assert!(pager.go_to(2, items.len()));
        assert_eq!(pager.window(&items), &[7, 8, 9, 10, 11, 12]);
        assert_eq!(pager.first_position(items.len()), 7);
    }

    #[test]
    fn test_last_page_is_partial() {
        let items = thirteen();
        assert_eq!(page_window(&items, 3, 6), &[13]);
        assert!(page_window(&items, 4, 6).is_empty());
        assert!(page_window(&items, 0, 6).is_empty());
    }

    #[test]
    fn test_previous_stops_at_first_page() {
        let mut pager = Paginator::new(6);
        assert!(!pager.previous(13));
        assert_eq!(pager.page(), 1);
    }
}
