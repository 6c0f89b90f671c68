//! Navigation links for list responses
//!
//! Each link is a query string rendered from the canonical options, so a
//! client following it lands on the same page the server would compute.

use serde::Serialize;

use super::meta::PaginationMeta;
use super::params::{FilterOptions, SortKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub current: String,
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub last: String,
}

impl PageLinks {
    pub fn new<F: SortKey>(options: &FilterOptions<F>, meta: &PaginationMeta) -> Self {
        let pages = &meta.pages;
        let at = |page: u64| options.with_page(page).query_string();

        Self {
            current: options.query_string(),
            first: at(pages.first),
            previous: pages.has_previous.then(|| at(pages.previous)),
            next: pages.has_next.then(|| at(pages.next)),
            last: at(pages.last),
        }
    }

    /// Prefix every link with `base` (e.g. `/api/v1/tenants/t1/vehicles`).
    pub fn with_base(self, base: &str) -> Self {
        let join = |qs: String| format!("{base}?{qs}");
        Self {
            current: join(self.current),
            first: join(self.first),
            previous: self.previous.map(join),
            next: self.next.map(join),
            last: join(self.last),
        }
    }

    /// RFC 8288 `Link` header value.
    pub fn link_header(&self) -> String {
        let mut parts = vec![format!("<{}>; rel=\"first\"", self.first)];
        if let Some(previous) = &self.previous {
            parts.push(format!("<{previous}>; rel=\"prev\""));
        }
        if let Some(next) = &self.next {
            parts.push(format!("<{next}>; rel=\"next\""));
        }
        parts.push(format!("<{}>; rel=\"last\"", self.last));
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::{Normalizer, RawListParams};

    fn options(page: &str, q: Option<&str>) -> FilterOptions {
        Normalizer::default().filter(&RawListParams {
            page: Some(page.to_string()),
            q: q.map(String::from),
            ..RawListParams::default()
        })
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let opts = options("2", Some("box truck"));
        let meta = PaginationMeta::for_options(&opts.pagination(), 25);
        let links = PageLinks::new(&opts, &meta);

        assert_eq!(links.current, "page=2&limit=10&q=box%20truck&order=DESC");
        assert_eq!(links.first, "page=1&limit=10&q=box%20truck&order=DESC");
        assert_eq!(links.previous.as_deref(), Some("page=1&limit=10&q=box%20truck&order=DESC"));
        assert_eq!(links.next.as_deref(), Some("page=3&limit=10&q=box%20truck&order=DESC"));
        assert_eq!(links.last, "page=3&limit=10&q=box%20truck&order=DESC");
    }

    #[test]
    fn single_page_has_no_neighbours() {
        let opts = options("1", None);
        let meta = PaginationMeta::for_options(&opts.pagination(), 3);
        let links = PageLinks::new(&opts, &meta);

        assert_eq!(links.previous, None);
        assert_eq!(links.next, None);
        assert_eq!(links.first, links.last);
    }

    #[test]
    fn following_a_link_reproduces_the_page() {
        let opts = options("2", Some("van"));
        let meta = PaginationMeta::for_options(&opts.pagination(), 40);
        let next = PageLinks::new(&opts, &meta).next.unwrap();

        let reparsed: FilterOptions =
            Normalizer::default().filter(&RawListParams::from_query_str(&next));

        assert_eq!(reparsed, opts.with_page(3));
    }

    #[test]
    fn with_base_prefixes_path() {
        let opts = options("1", None);
        let meta = PaginationMeta::for_options(&opts.pagination(), 0);
        let links = PageLinks::new(&opts, &meta).with_base("/api/v1/tenants/t1/vehicles");
        assert_eq!(links.first, "/api/v1/tenants/t1/vehicles?page=1&limit=10&order=DESC");
    }

    #[test]
    fn link_header_lists_available_relations() {
        let opts = options("1", None);
        let meta = PaginationMeta::for_options(&opts.pagination(), 15);
        let header = PageLinks::new(&opts, &meta).with_base("/v").link_header();

        assert_eq!(
            header,
            "</v?page=1&limit=10&order=DESC>; rel=\"first\", \
             </v?page=2&limit=10&order=DESC>; rel=\"next\", \
             </v?page=2&limit=10&order=DESC>; rel=\"last\""
        );
    }
}
