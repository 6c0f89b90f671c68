//! Vehicle repository interface

use async_trait::async_trait;

use super::model::{Vehicle, VehicleFilter};
use crate::domain::DomainResult;
use crate::shared::pagination::{PageSlice, PageWindow};

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Rows of `tenant_id` matching `filter`, restricted to `window`, plus
    /// the number of matching rows before windowing.
    async fn find_page(
        &self,
        tenant_id: &str,
        window: PageWindow,
        filter: &VehicleFilter,
    ) -> DomainResult<PageSlice<Vehicle>>;

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> DomainResult<Option<Vehicle>>;
}
