//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 10;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;

    /// Creates a new page request.
    ///
    /// Page numbers below 1 are treated as the first page and the size is
    /// clamped to `1..=MAX_SIZE`.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// Returns the number of items to skip.
    #[must_use]
    ///
    /// Saturates for page numbers far past the end of any collection.
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Returns the maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The current page number (1-indexed).
    pub page: usize,
    /// The requested page size.
    pub page_size: usize,
    /// The total number of items across all pages.
    pub total_count: u64,
    /// The total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(items: Vec<T>, page: usize, page_size: usize, total_count: u64) -> Self {
        let total_pages = if page_size > 0 {
            total_count.div_ceil(page_size as u64)
        } else {
            0
        };

        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
        }
    }

    /// Cuts the requested page out of a full, already ordered collection.
    #[must_use]
    pub fn from_collection(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self::new(items, request.page, request.size, total)
    }
}
