//! Shared list use-case: window → fetch → meta → envelope

use std::future::Future;

use tracing::debug;

use crate::domain::DomainResult;
use crate::shared::pagination::{FilterOptions, PageSlice, PageWindow, Pagination, SortKey};

/// Run one paginated fetch.
///
/// `fetch` receives the window derived from `filter` and must report the
/// total number of matching rows alongside the rows themselves.
pub async fn paginate<T, F, Fetch, Fut>(
    filter: &FilterOptions<F>,
    fetch: Fetch,
) -> DomainResult<Pagination<T>>
where
    F: SortKey,
    Fetch: FnOnce(PageWindow) -> Fut,
    Fut: Future<Output = DomainResult<PageSlice<T>>>,
{
    let options = filter.pagination();
    let window = options.window();
    let slice = fetch(window).await?;

    debug!(
        page = options.page(),
        limit = options.limit(),
        skip = window.skip,
        rows = slice.rows.len(),
        total = slice.total,
        "Fetched page"
    );

    Ok(Pagination::from_slice(&options, slice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::shared::pagination::{Normalizer, RawListParams};

    fn filter(page: &str, limit: &str) -> FilterOptions {
        Normalizer::default().filter(&RawListParams {
            page: Some(page.into()),
            limit: Some(limit.into()),
            ..RawListParams::default()
        })
    }

    #[tokio::test]
    async fn passes_window_through_and_builds_meta() {
        let rows: Vec<u32> = (1..=25).collect();
        let page = paginate(&filter("3", "10"), |window| {
            let rows = rows.clone();
            async move {
                assert_eq!(window, PageWindow { skip: 20, take: 10 });
                let slice = rows
                    .iter()
                    .copied()
                    .skip(window.skip as usize)
                    .take(window.take as usize)
                    .collect();
                Ok(PageSlice::new(slice, rows.len() as u64))
            }
        })
        .await
        .unwrap();

        assert_eq!(page.data, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.meta.pages.current, 3);
        assert!(!page.meta.pages.has_next);
        assert_eq!(page.meta.pages.previous, 2);
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let result: DomainResult<Pagination<u32>> = paginate(&filter("1", "10"), |_| async {
            Err(DomainError::Storage("connection reset".into()))
        })
        .await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }
}
