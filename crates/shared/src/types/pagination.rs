//! Pagination types for list operations.
//!
//! Every paginated read in the engine uses the same contract: a 1-based
//! `page`, a `page_size`, and a response carrying the post-filter `total`
//! plus `has_more = page * page_size < total`.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageRequest {
    /// Creates a page request, clamping both values to at least 1.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Returns a copy with page and page size clamped to at least 1.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.page_size)
    }

    /// Calculates the number of items to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size)
    }

    /// Returns the maximum number of items on one page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Total number of items after filtering, across all pages.
    pub total: u64,
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Whether a later page exists.
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total: u64) -> Self {
        let has_more = u64::from(page) * u64::from(page_size) < total;

        Self {
            items,
            total,
            page,
            page_size,
            has_more,
        }
    }

    /// Maps every item, keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            has_more: self.has_more,
        }
    }
}

/// Slices an already filtered and sorted list into one page.
///
/// `total` is the length of the full list, not of the returned slice.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> PageResponse<T> {
    let request = request.normalized();
    let total = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);

    let page_items: Vec<T> = items.into_iter().skip(offset).take(limit).collect();

    PageResponse::new(page_items, request.page, request.page_size, total)
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
