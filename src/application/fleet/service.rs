//! Fleet listing service
//!
//! Thin orchestration over the repositories: tenant scoping, parent
//! existence checks, and the shared pagination flow.

use std::sync::Arc;

use tracing::instrument;

use crate::application::listing::paginate;
use crate::domain::{
    DomainError, DomainResult, FuelLog, FuelLogFilter, RepositoryProvider, Vehicle, VehicleFilter,
};
use crate::shared::pagination::Pagination;

pub struct FleetService {
    repos: Arc<dyn RepositoryProvider>,
}

impl FleetService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    #[instrument(skip(self, filter), fields(page = filter.page(), limit = filter.limit()))]
    pub async fn list_vehicles(
        &self,
        tenant_id: &str,
        filter: &VehicleFilter,
    ) -> DomainResult<Pagination<Vehicle>> {
        paginate(filter, |window| {
            self.repos.vehicles().find_page(tenant_id, window, filter)
        })
        .await
    }

    /// Fuel logs of one vehicle. Fails with `NotFound` when the vehicle does
    /// not belong to the tenant.
    #[instrument(skip(self, filter), fields(page = filter.page(), limit = filter.limit()))]
    pub async fn list_fuel_logs(
        &self,
        tenant_id: &str,
        vehicle_id: &str,
        filter: &FuelLogFilter,
    ) -> DomainResult<Pagination<FuelLog>> {
        if self
            .repos
            .vehicles()
            .find_by_id(tenant_id, vehicle_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Vehicle", "id", vehicle_id));
        }

        paginate(filter, |window| {
            self.repos
                .fuel_logs()
                .find_page(tenant_id, vehicle_id, window, filter)
        })
        .await
    }
}
