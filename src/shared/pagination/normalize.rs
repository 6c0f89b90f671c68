//! Request normalizer
//!
//! Turns untrusted list parameters into canonical options. Nothing here
//! fails: a field that cannot be used degrades to its configured default and
//! the other fields are unaffected.

use super::config::{OverLimitPolicy, PaginationConfig, LIMIT_MIN, PAGE_MIN};
use super::params::{
    FilterOptions, PaginationOptions, RawListParams, SortKey, SortOrder,
};

/// Pure normalizer bound to one resource's [`PaginationConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalizer {
    config: PaginationConfig,
}

impl Normalizer {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Absent, non-integer or sub-minimum input yields `default_page`.
    /// There is no upper bound.
    pub fn page(&self, raw: Option<&str>) -> u64 {
        raw.and_then(parse_integer)
            .filter(|page| *page >= PAGE_MIN as i64)
            .map_or(self.config.default_page, |page| page as u64)
    }

    /// Absent, non-integer or sub-minimum input yields `default_limit`.
    /// Input above `max_limit` follows the configured [`OverLimitPolicy`].
    pub fn limit(&self, raw: Option<&str>) -> u64 {
        let Some(limit) = raw.and_then(parse_integer) else {
            return self.config.default_limit;
        };
        if limit < LIMIT_MIN as i64 {
            return self.config.default_limit;
        }
        let limit = limit as u64;
        if limit <= self.config.max_limit {
            return limit;
        }
        match self.config.over_limit {
            OverLimitPolicy::Clamp => self.config.max_limit,
            OverLimitPolicy::Fallback => self.config.default_limit,
        }
    }

    pub fn query(&self, raw: Option<&str>) -> String {
        raw.map(str::trim).unwrap_or_default().to_owned()
    }

    pub fn sort_order(&self, raw: Option<&str>) -> SortOrder {
        raw.and_then(SortOrder::parse)
            .unwrap_or(self.config.default_order)
    }

    pub fn sort_field<F: SortKey>(&self, raw: Option<&str>) -> Option<F> {
        raw.and_then(F::parse)
    }

    pub fn pagination(&self, raw: &RawListParams) -> PaginationOptions {
        PaginationOptions::new_unchecked(
            self.page(raw.page.as_deref()),
            self.limit(raw.limit.as_deref()),
        )
    }

    pub fn filter<F: SortKey>(&self, raw: &RawListParams) -> FilterOptions<F> {
        FilterOptions::from_parts(
            self.pagination(raw),
            self.query(raw.q.as_deref()),
            self.sort_field(raw.sort.as_deref()),
            self.sort_order(raw.order.as_deref()),
        )
    }
}

/// Accepts optionally signed decimal integer literals, ignoring surrounding
/// whitespace. `"2.0"`, `"1e3"` and out-of-range values are rejected.
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
