//! Page state and the pagination step of the derivation.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `row_count` rows. Always at least 1.
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    row_count.div_ceil(page_size.max(1)).max(1)
}

/// Current page and page size.
///
/// Pages are 1-based. `current_page` is kept inside `[1, total_pages]` by
/// [`clamp`](Pagination::clamp), which the grid calls on every derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Page 1 with the given page size (0 is treated as 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Same page size, page `page` clamped into range.
    pub fn at(self, page: usize, row_count: usize) -> Self {
        Self {
            current_page: page,
            ..self
        }
        .clamp(row_count)
    }

    /// Pages needed for `row_count` rows.
    pub fn total_pages(&self, row_count: usize) -> usize {
        total_pages(row_count, self.page_size)
    }

    /// Pull `current_page` into `[1, total_pages]`.
    pub fn clamp(self, row_count: usize) -> Self {
        let last = self.total_pages(row_count);
        Self {
            current_page: self.current_page.clamp(1, last),
            page_size: self.page_size.max(1),
        }
    }

    /// Index range of the current page within `row_count` rows.
    ///
    /// A page past the end yields an empty range at `row_count`.
    pub fn window(&self, row_count: usize) -> Range<usize> {
        let size = self.page_size.max(1);
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(size)
            .min(row_count);
        let end = start.saturating_add(size).min(row_count);
        start..end
    }
}

/// Pagination footer data for one derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Number of sorted rows across all pages.
    pub total_rows: usize,
    /// 1-based index of the first row on the page (0 when there are none).
    pub range_start: usize,
    /// 1-based index of the last row on the page.
    pub range_end: usize,
}

impl PageInfo {
    pub(crate) fn new(pagination: Pagination, window: &Range<usize>, total_rows: usize) -> Self {
        Self {
            current_page: pagination.current_page,
            total_pages: pagination.total_pages(total_rows),
            page_size: pagination.page_size,
            total_rows,
            range_start: if window.is_empty() { 0 } else { window.start + 1 },
            range_end: window.end,
        }
    }

    /// Returns `true` if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
