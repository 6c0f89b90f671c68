//! Fuel log repository interface

use async_trait::async_trait;

use super::model::{FuelLog, FuelLogFilter};
use crate::domain::DomainResult;
use crate::shared::pagination::{PageSlice, PageWindow};

#[async_trait]
pub trait FuelLogRepository: Send + Sync {
    async fn find_page(
        &self,
        tenant_id: &str,
        vehicle_id: &str,
        window: PageWindow,
        filter: &FuelLogFilter,
    ) -> DomainResult<PageSlice<FuelLog>>;
}
