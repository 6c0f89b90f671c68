//! Offset pagination contract
//!
//! Raw list parameters go through the [`Normalizer`] into [`FilterOptions`];
//! the storage layer fetches the [`PageWindow`] and reports a [`PageSlice`];
//! [`Pagination::from_slice`] attaches the [`PaginationMeta`] clients use to
//! render navigation.

pub mod config;
pub mod envelope;
pub mod error;
pub mod links;
pub mod meta;
pub mod normalize;
pub mod params;

pub use config::{
    OverLimitPolicy, PaginationConfig, DEFAULT_LIMIT, DEFAULT_PAGE, LIMIT_MAX, LIMIT_MIN, PAGE_MIN,
};
pub use envelope::{PageSlice, PageWindow, Pagination};
pub use error::PaginationError;
pub use links::PageLinks;
pub use meta::{PageNumbers, PaginationMeta};
pub use normalize::Normalizer;
pub use params::{FilterOptions, NoSortKey, PaginationOptions, RawListParams, SortKey, SortOrder};
