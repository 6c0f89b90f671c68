//! List query extractor
//!
//! Unlike `Query<T>`, [`ListQuery`] never rejects: pagination input is
//! untrusted and every malformed field degrades to its default in the
//! normalizer, so a bad query string must still reach the handler.
//! Decoding goes through [`RawListParams::from_query_str`], the same path
//! links built on the client side are read with.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::shared::pagination::RawListParams;

/// Raw `page` / `limit` / `q` / `order` / `sort` fields of the request URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery(pub RawListParams);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = RawListParams::from_query_str(parts.uri.query().unwrap_or_default());
        debug!(query = ?parts.uri.query(), params = ?raw, "List query");
        Ok(Self(raw))
    }
}
