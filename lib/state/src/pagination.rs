//! Server-driven page pagination.
//!
//! The server computes every pagination value — totals, adjacency, the
//! "no earlier page" signal (`previous_page == page`). The client only
//! consumes the summary to derive button enablement and to pick the next
//! page number; it never computes `page ± 1` itself.

use serde::{Deserialize, Serialize};

/// Page request half: which page and how many rows per page.
///
/// Zero means "unset" and the server substitutes its defaults and
/// clamps out-of-range values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagePagination {
    pub page: i32,
    pub per_page: i32,
}

impl PagePagination {
    pub fn new(page: i32, per_page: i32) -> Self {
        Self { page, per_page }
    }

    /// Jump to a (server-provided) page number.
    pub fn set_page(&mut self, page: i32) {
        self.page = page;
    }

    /// Change the page size and reset to the first page. Zero is a no-op.
    pub fn set_per_page(&mut self, per_page: i32) {
        if per_page == 0 {
            return;
        }
        self.page = 1;
        self.per_page = per_page;
    }
}

/// Server-computed summary of a list's current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagePaginationResult {
    pub page: i32,
    pub per_page: i32,
    pub total_pages: i32,
    pub total_items: i64,
    pub seen_items: i64,
    pub previous_page: i32,
    pub next_page: i32,
}

/// Navigation enablement derived from a [`PagePaginationResult`].
#[derive(Debug, Clone, Copy)]
pub struct PagePager<'a> {
    result: &'a PagePaginationResult,
}

impl<'a> PagePager<'a> {
    pub fn new(result: &'a PagePaginationResult) -> Self {
        Self { result }
    }

    /// The server signals "no earlier page" by echoing the current page.
    pub fn previous_page_disabled(&self) -> bool {
        self.result.previous_page == self.result.page
    }

    pub fn next_page_disabled(&self) -> bool {
        self.result.next_page == self.result.page
    }

    /// Server-provided target for the previous-page action.
    pub fn previous_page(&self) -> i32 {
        self.result.previous_page
    }

    /// Server-provided target for the next-page action.
    pub fn next_page(&self) -> i32 {
        self.result.next_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(page: i32, previous: i32, next: i32) -> PagePaginationResult {
        PagePaginationResult {
            page,
            per_page: 10,
            total_pages: 5,
            total_items: 42,
            seen_items: page as i64 * 10,
            previous_page: previous,
            next_page: next,
        }
    }

    #[test]
    fn first_page_disables_previous_only() {
        let result = summary(1, 1, 2);
        let pager = PagePager::new(&result);
        assert!(pager.previous_page_disabled());
        assert!(!pager.next_page_disabled());
        assert_eq!(pager.next_page(), 2);
    }

    #[test]
    fn last_page_disables_next_only() {
        let result = summary(5, 4, 5);
        let pager = PagePager::new(&result);
        assert!(!pager.previous_page_disabled());
        assert!(pager.next_page_disabled());
        assert_eq!(pager.previous_page(), 4);
    }

    #[test]
    fn middle_page_enables_both() {
        let result = summary(3, 2, 4);
        let pager = PagePager::new(&result);
        assert!(!pager.previous_page_disabled());
        assert!(!pager.next_page_disabled());
    }

    #[test]
    fn single_page_disables_both() {
        let result = summary(1, 1, 1);
        let pager = PagePager::new(&result);
        assert!(pager.previous_page_disabled());
        assert!(pager.next_page_disabled());
    }

    #[test]
    fn set_per_page_resets_to_first_page() {
        let mut page = PagePagination::new(7, 10);
        page.set_per_page(25);
        assert_eq!(page, PagePagination::new(1, 25));
    }

    #[test]
    fn set_per_page_zero_is_noop() {
        let mut page = PagePagination::new(7, 10);
        page.set_per_page(0);
        assert_eq!(page, PagePagination::new(7, 10));
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let json = serde_json::to_string(&summary(2, 1, 3)).unwrap();
        assert!(json.contains("\"perPage\""));
        assert!(json.contains("\"totalItems\""));
        assert!(json.contains("\"previousPage\""));

        // Partial summaries deserialize with zero defaults.
        let partial: PagePaginationResult = serde_json::from_str("{\"page\":2}").unwrap();
        assert_eq!(partial.page, 2);
        assert_eq!(partial.total_pages, 0);
    }
}
