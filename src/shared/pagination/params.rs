//! Pagination and filter parameter types
//!
//! `RawListParams` is what arrives over the wire. `PaginationOptions` and
//! `FilterOptions` are the canonical forms produced by the
//! [`Normalizer`](super::Normalizer); their fields are private so the
//! invariants (`page >= 1`, `1 <= limit <= max_limit`) cannot be broken after
//! construction.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::config::{PaginationConfig, LIMIT_MIN, PAGE_MIN};
use super::envelope::PageWindow;
use super::error::PaginationError;

/// Sort direction. Parsing is case-sensitive: only `ASC` and `DESC` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource's allow-list of sortable fields.
///
/// Each list resource defines its own enum; unknown names parse to `None`
/// and the resource falls back to its default ordering.
pub trait SortKey: Copy + Eq + fmt::Debug + Send + Sync {
    fn parse(raw: &str) -> Option<Self>;
    fn as_str(&self) -> &'static str;
}

/// Sort key for resources that expose no sortable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSortKey {}

impl SortKey for NoSortKey {
    fn parse(_raw: &str) -> Option<Self> {
        None
    }

    fn as_str(&self) -> &'static str {
        match *self {}
    }
}

/// Untrusted list parameters exactly as they appear in a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RawListParams {
    /// Page number, 1-based. Invalid values fall back to 1.
    pub page: Option<String>,
    /// Rows per page (1..=100). Invalid values fall back to 10; larger values are clamped.
    pub limit: Option<String>,
    /// Free-text filter. Surrounding whitespace is ignored.
    pub q: Option<String>,
    /// `ASC` or `DESC`. Anything else uses the resource default.
    pub order: Option<String>,
    /// Resource-specific sort field.
    pub sort: Option<String>,
}

impl RawListParams {
    /// Build from decoded query pairs. Unknown keys are ignored; when a key
    /// repeats, the last occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut raw.page,
                "limit" => &mut raw.limit,
                "q" => &mut raw.q,
                "order" => &mut raw.order,
                "sort" => &mut raw.sort,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        raw
    }

    /// Parse an `application/x-www-form-urlencoded` query string such as
    /// `page=2&q=box%20truck` (a leading `?` is allowed). This is the only
    /// decoder: the HTTP extractor and client-side callers both go through it.
    ///
    /// Bytes that are not UTF-8 become U+FFFD and the pair is kept; a `%`
    /// not followed by two hex digits is taken literally.
    pub fn from_query_str(query: &str) -> Self {
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|kv| !kv.is_empty())
            .map(|kv| {
                let (key, value) = kv.split_once('=').unwrap_or((kv, ""));
                (form_decode(key), form_decode(value))
            });
        Self::from_pairs(pairs)
    }
}

fn form_decode(raw: &str) -> String {
    let plus_as_space = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(plus_as_space.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Canonical page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationOptions {
    page: u64,
    limit: u64,
}

impl PaginationOptions {
    /// Construct from already-numeric values, enforcing the same bounds the
    /// normalizer guarantees.
    pub fn try_new(
        page: u64,
        limit: u64,
        config: &PaginationConfig,
    ) -> Result<Self, PaginationError> {
        if page < PAGE_MIN {
            return Err(PaginationError::PageOutOfRange {
                value: page,
                min: PAGE_MIN,
            });
        }
        if !(LIMIT_MIN..=config.max_limit).contains(&limit) {
            return Err(PaginationError::LimitOutOfRange {
                value: limit,
                min: LIMIT_MIN,
                max: config.max_limit,
            });
        }
        Ok(Self { page, limit })
    }

    pub(super) fn new_unchecked(page: u64, limit: u64) -> Self {
        debug_assert!(page >= PAGE_MIN && limit >= LIMIT_MIN);
        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The `(skip, take)` slice of matching rows this page covers.
    ///
    /// `skip` saturates instead of overflowing for absurd page numbers; such a
    /// window simply matches nothing.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: (self.page - 1).saturating_mul(self.limit),
            take: self.limit,
        }
    }
}

/// Canonical list request: page, free-text query and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions<F: SortKey = NoSortKey> {
    pagination: PaginationOptions,
    query: String,
    sort_field: Option<F>,
    sort_order: SortOrder,
}

impl<F: SortKey> FilterOptions<F> {
    pub(super) fn from_parts(
        pagination: PaginationOptions,
        query: String,
        sort_field: Option<F>,
        sort_order: SortOrder,
    ) -> Self {
        Self {
            pagination,
            query,
            sort_field,
            sort_order,
        }
    }

    pub fn pagination(&self) -> PaginationOptions {
        self.pagination
    }

    pub fn page(&self) -> u64 {
        self.pagination.page
    }

    pub fn limit(&self) -> u64 {
        self.pagination.limit
    }

    pub fn window(&self) -> PageWindow {
        self.pagination.window()
    }

    /// Trimmed search text; empty means "no filter".
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The search text, or `None` when no filter applies.
    pub fn search(&self) -> Option<&str> {
        (!self.query.is_empty()).then_some(self.query.as_str())
    }

    pub fn sort_field(&self) -> Option<F> {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Same filter, different page.
    pub fn with_page(&self, page: u64) -> Self {
        Self {
            pagination: PaginationOptions::new_unchecked(page.max(PAGE_MIN), self.pagination.limit),
            ..self.clone()
        }
    }

    /// Render back into transport fields. Normalizing the result yields `self`.
    pub fn to_raw(&self) -> RawListParams {
        RawListParams {
            page: Some(self.page().to_string()),
            limit: Some(self.limit().to_string()),
            q: self.search().map(str::to_owned),
            order: Some(self.sort_order.as_str().to_owned()),
            sort: self.sort_field.map(|f| f.as_str().to_owned()),
        }
    }

    /// Render as a URL query string (without the leading `?`).
    pub fn query_string(&self) -> String {
        let mut pairs = vec![
            format!("page={}", self.page()),
            format!("limit={}", self.limit()),
        ];
        if let Some(q) = self.search() {
            pairs.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(field) = self.sort_field {
            pairs.push(format!("sort={}", urlencoding::encode(field.as_str())));
        }
        pairs.push(format!("order={}", self.sort_order.as_str()));
        pairs.join("&")
    }
}
