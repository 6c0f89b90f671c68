//! Page navigation metadata
//!
//! `current` echoes the requested page even past the end of the data, while
//! `previous`/`next` fall back to page 1 instead of pointing nowhere. Clients
//! depend on this exact shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::config::LIMIT_MIN;
use super::params::PaginationOptions;

/// Navigation numbers for one page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageNumbers {
    /// Always 1
    pub first: u64,
    /// `current - 1`, or 1 on the first page
    pub previous: u64,
    pub has_previous: bool,
    /// The requested page, never clamped
    pub current: u64,
    /// `current + 1`, or 1 when there is no next page
    pub next: u64,
    pub has_next: bool,
    /// Number of pages, at least 1
    pub last: u64,
    /// Same value as `last`
    pub total: u64,
}

/// Metadata describing where a page sits within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Page size used for this response
    pub limit: u64,
    /// Total number of matching rows across all pages
    pub count: u64,
    pub pages: PageNumbers,
}

impl PaginationMeta {
    /// Compute navigation metadata.
    ///
    /// # Panics
    ///
    /// Panics when `limit` is zero. Normalized options never carry such a
    /// limit, so reaching this is a caller bug.
    pub fn compute(page: u64, limit: u64, count: u64) -> Self {
        assert!(
            limit >= LIMIT_MIN,
            "pagination limit must be at least {LIMIT_MIN}, got {limit}"
        );

        let total_pages = count.div_ceil(limit);
        let last = total_pages.max(1);
        let has_previous = page > 1;
        let has_next = page < total_pages;

        Self {
            limit,
            count,
            pages: PageNumbers {
                first: 1,
                previous: if has_previous { page - 1 } else { 1 },
                has_previous,
                current: page,
                next: if has_next { page + 1 } else { 1 },
                has_next,
                last,
                total: last,
            },
        }
    }

    pub fn for_options(options: &PaginationOptions, count: u64) -> Self {
        Self::compute(options.page(), options.limit(), count)
    }

    /// True when the requested page lies beyond the last page of data.
    pub fn is_past_end(&self) -> bool {
        self.pages.current > self.pages.last
    }
}
