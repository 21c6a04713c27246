//! Serialisable envelope for one page of results.

use serde::Serialize;

use crate::{PageNumber, PageRequest, PageSize, page_count};

/// One page of items plus the totals needed for page navigation.
///
/// Serialises as:
///
/// ```json
/// {"items": [...], "page": 2, "pageSize": 8, "totalItems": 9, "totalPages": 2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: PageNumber,
    page_size: PageSize,
    total_items: u64,
    total_pages: u64,
}

impl<T> Page<T> {
    /// Build a page from the items returned for `request` and the total
    /// number of matching items across all pages.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.number(),
            page_size: request.size(),
            total_items,
            total_pages: page_count(total_items, request.size()),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Current page number.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Page size used to compute the totals.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Number of matching items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages needed to show every matching item.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a page exists before this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page.get() > 1
    }

    /// Whether a page exists after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.page.get() as u64) < self.total_pages
    }

    /// Transform every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
