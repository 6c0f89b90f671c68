//! Query window and response envelope

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::meta::PaginationMeta;
use super::params::PaginationOptions;

/// Contiguous slice of matching rows to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u64,
}

/// What a storage collaborator returns for one window: the rows and the
/// number of rows matching the filter before windowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> PageSlice<T> {
    pub fn new(rows: Vec<T>, total: u64) -> Self {
        Self { rows, total }
    }

    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }
}

/// Paginated response body: `{ "data": [...], "meta": {...} }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Pagination<T> {
    /// Assemble the envelope for `options` from a fetched slice.
    ///
    /// Rows beyond the page size are dropped so `data.len() <= limit` holds
    /// even if the collaborator over-fetches.
    pub fn from_slice(options: &PaginationOptions, slice: PageSlice<T>) -> Self {
        let PageSlice { mut rows, total } = slice;
        rows.truncate(usize::try_from(options.limit()).unwrap_or(usize::MAX));
        Self {
            data: rows,
            meta: PaginationMeta::for_options(options, total),
        }
    }

    pub fn map<U, F>(self, f: F) -> Pagination<U>
    where
        F: FnMut(T) -> U,
    {
        Pagination {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::PaginationConfig;

    fn options(page: u64, limit: u64) -> PaginationOptions {
        PaginationOptions::try_new(page, limit, &PaginationConfig::default()).unwrap()
    }

    #[test]
    fn from_slice_builds_meta_from_total() {
        let page = Pagination::from_slice(&options(2, 2), PageSlice::new(vec!["c", "d"], 5));
        assert_eq!(page.data, vec!["c", "d"]);
        assert_eq!(page.meta.count, 5);
        assert_eq!(page.meta.pages.last, 3);
        assert_eq!(page.meta.pages.current, 2);
    }

    #[test]
    fn from_slice_truncates_over_fetch() {
        let page = Pagination::from_slice(&options(1, 2), PageSlice::new(vec![1, 2, 3], 3));
        assert_eq!(page.data, vec![1, 2]);
    }

    #[test]
    fn page_past_end_is_empty_not_an_error() {
        let page: Pagination<u8> = Pagination::from_slice(&options(9, 10), PageSlice::new(vec![], 25));
        assert!(page.is_empty());
        assert_eq!(page.meta.pages.current, 9);
        assert_eq!(page.meta.pages.last, 3);
    }

    #[test]
    fn map_keeps_meta() {
        let page = Pagination::from_slice(&options(1, 10), PageSlice::new(vec![1, 2], 2));
        let meta = page.meta;
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.data, vec![10, 20]);
        assert_eq!(mapped.meta, meta);
    }

    #[test]
    fn serializes_as_data_and_meta() {
        let page = Pagination::from_slice(&options(1, 10), PageSlice::<u8>::empty());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["meta"]["count"], 0);
        assert_eq!(json["meta"]["pages"]["total"], 1);
    }
}
