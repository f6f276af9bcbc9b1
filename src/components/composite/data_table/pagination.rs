//! Pagination
//!
//! Page arithmetic and the page navigation model for the DataTable.

use std::ops::Range;

/// Number of pages for `total_items` rows, never less than 1
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_items.div_ceil(page_size).max(1)
}

/// Clamp a 1-based page number into `[1, total_pages]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of a 1-based page, truncated to the item count
pub fn page_range(page: usize, page_size: usize, total_items: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);
    start..end
}

/// Page navigation bar model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    total_pages: usize,
    total_items: usize,
}

impl Pagination {
    /// Create a pagination model; the page is clamped into range
    pub fn new(current_page: usize, total_pages: usize, total_items: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: clamp_page(current_page, total_pages),
            total_pages,
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Whether the "Previous" button is enabled
    pub fn can_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the "Next" button is enabled
    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Target of the "Previous" button
    pub fn previous_page(&self) -> usize {
        self.current_page.saturating_sub(1).max(1)
    }

    /// Target of the "Next" button
    pub fn next_page(&self) -> usize {
        (self.current_page + 1).min(self.total_pages)
    }

    /// Bar is only shown with more than one page
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}
