//! Pagination of the displayed rows.

use std::ops::Range;

/// Default pagination summary, e.g. `"11 - 20 of 42"`.
pub const DEFAULT_SUMMARY_TEMPLATE: &str = "{min} - {max} of {total}";

/// Page navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    First,
    Previous,
    Next,
    Last,
}

/// Current page and page size.
///
/// A page size of `None` or `Some(0)` disables paging: every row is on the
/// single page and the current page is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: Option<usize>,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: None,
            current_page: 1,
        }
    }
}

impl Pagination {
    /// Creates pagination on page 1.
    pub fn new(page_size: Option<usize>) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    /// The effective page size, `None` when paging is off.
    pub fn page_size(&self) -> Option<usize> {
        self.page_size.filter(|&size| size > 0)
    }

    /// Returns `true` when rows are split into pages.
    pub fn is_paged(&self) -> bool {
        self.page_size().is_some()
    }

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: Option<usize>) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Number of pages for `total` rows, never less than 1.
    pub fn max_page(&self, total: usize) -> usize {
        match self.page_size() {
            Some(size) => total.div_ceil(size).max(1),
            None => 1,
        }
    }

    /// Jumps to `page`, clamped into `[1, max_page]`.
    ///
    /// Returns `true` if the current page changed.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        let target = page.clamp(1, self.max_page(total));
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    /// Handles a navigation button. Never fails; moves are clamped.
    ///
    /// Returns `true` if the current page changed.
    pub fn navigate(&mut self, button: PageButton, total: usize) -> bool {
        let target = match button {
            PageButton::First => 1,
            PageButton::Previous => self.current_page.saturating_sub(1),
            PageButton::Next => self.current_page.saturating_add(1),
            PageButton::Last => self.max_page(total),
        };
        self.go_to(target, total)
    }

    /// Computes the visible slice for `total` rows.
    ///
    /// The current page is clamped into range first, so a page left stale
    /// by a shrinking row set still yields a valid window.
    pub fn window(&self, total: usize) -> PageWindow {
        let Some(size) = self.page_size() else {
            return PageWindow {
                range: 0..total,
                min_item: 1,
                max_item: total,
                max_page: 1,
                current_page: 1,
                total,
            };
        };

        let max_page = self.max_page(total);
        let page = self.current_page.clamp(1, max_page);
        let start = size * (page - 1);
        let end = (size * page).min(total);
        PageWindow {
            range: start.min(total)..end,
            min_item: start + 1,
            max_item: end,
            max_page,
            current_page: page,
            total,
        }
    }
}

/// The slice of rows on the current page plus its summary numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// 0-based index range into the displayed rows.
    pub range: Range<usize>,
    /// 1-based number of the first row on the page. Only meaningful when
    /// `total > 0`.
    pub min_item: usize,
    /// 1-based number of the last row on the page.
    pub max_item: usize,
    /// Number of pages, at least 1.
    pub max_page: usize,
    /// 1-based current page.
    pub current_page: usize,
    /// Number of displayed rows across all pages.
    pub total: usize,
}

impl PageWindow {
    /// Renders a summary label from `template`.
    ///
    /// Recognised placeholders are `{min}`, `{max}`, `{total}`, `{page}`
    /// and `{pages}`. With no rows, `{min}` renders as `0`.
    ///
    /// ```
    /// use tablekit_lib::page::{Pagination, DEFAULT_SUMMARY_TEMPLATE};
    ///
    /// let window = Pagination::new(Some(10)).window(42);
    /// assert_eq!(window.label(DEFAULT_SUMMARY_TEMPLATE), "1 - 10 of 42");
    /// assert_eq!(window.label("Page {page}/{pages}"), "Page 1/5");
    /// ```
    pub fn label(&self, template: &str) -> String {
        let min = if self.total == 0 { 0 } else { self.min_item };
        template
            .replace("{min}", &min.to_string())
            .replace("{max}", &self.max_item.to_string())
            .replace("{total}", &self.total.to_string())
            .replace("{pages}", &self.max_page.to_string())
            .replace("{page}", &self.current_page.to_string())
    }
}
