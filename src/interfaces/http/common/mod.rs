//! Shared HTTP building blocks: response wrapper, error mapping, list query
//! extraction and paged responses.

pub mod list_query;

pub use list_query::ListQuery;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::pagination::{FilterOptions, PageLinks, Pagination, SortKey};

/// Standard wrapper for non-list responses and errors.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain failure to its HTTP status and error body.
pub fn domain_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Storage(_) => {
            error!(error = %e, "Storage failure while serving request");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

/// `{data, meta}` body plus a `Link` header pointing at the neighbouring
/// pages under `base`.
pub fn paged_response<T, F>(page: Pagination<T>, filter: &FilterOptions<F>, base: &str) -> Response
where
    T: Serialize,
    F: SortKey,
{
    let links = PageLinks::new(filter, &page.meta).with_base(base);
    let mut response = Json(page).into_response();
    if let Ok(value) = HeaderValue::from_str(&links.link_header()) {
        response.headers_mut().insert(header::LINK, value);
    }
    response
}
