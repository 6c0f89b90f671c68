//! In-memory storage implementation

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use dashmap::DashMap;

use crate::domain::{
    DomainResult, FuelLog, FuelLogFilter, FuelLogRepository, FuelLogSortField, RepositoryProvider,
    Vehicle, VehicleFilter, VehicleRepository, VehicleSortField, VehicleStatus,
};
use crate::shared::pagination::{PageSlice, PageWindow, SortOrder};

/// In-memory fleet storage for development and testing
#[derive(Default)]
pub struct InMemoryFleetStore {
    vehicles: DashMap<String, Vehicle>,
    fuel_logs: DashMap<String, FuelLog>,
}

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_vehicle(&self, vehicle: Vehicle) {
        self.vehicles.insert(vehicle.id.clone(), vehicle);
    }

    pub fn insert_fuel_log(&self, log: FuelLog) {
        self.fuel_logs.insert(log.id.clone(), log);
    }

    /// Insert `count` generated vehicles for `tenant_id` and return them in
    /// creation order.
    pub fn seed_vehicles(&self, tenant_id: &str, count: usize) -> Vec<Vehicle> {
        const CATALOG: [(&str, &str, &str); 3] = [
            ("Delivery Van", "Ford", "Transit"),
            ("Box Truck", "Isuzu", "NPR"),
            ("Pickup", "Toyota", "Hilux"),
        ];

        let base = Utc
            .with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .single()
            .unwrap_or_default();
        let offset = self.vehicles.len();

        (0..count)
            .map(|i| {
                let n = offset + i;
                let (kind, make, model) = CATALOG[n % CATALOG.len()];
                let created_at = base + Duration::minutes(n as i64);
                let vehicle = Vehicle {
                    id: format!("{tenant_id}-veh-{n:04}"),
                    tenant_id: tenant_id.to_string(),
                    name: format!("{kind} {}", i + 1),
                    make: make.to_string(),
                    model: model.to_string(),
                    year: 2015 + (n % 9) as i32,
                    license_plate: format!("{}-{n:04}", tenant_id.to_uppercase()),
                    vin: None,
                    status: VehicleStatus::Active,
                    created_at,
                    updated_at: created_at,
                };
                self.insert_vehicle(vehicle.clone());
                vehicle
            })
            .collect()
    }

    /// Insert `count` generated fuel logs for `vehicle`.
    pub fn seed_fuel_logs(&self, vehicle: &Vehicle, count: usize) -> Vec<FuelLog> {
        const STATIONS: [&str; 3] = ["Shell", "BP", "Aral"];

        let base = vehicle.created_at;
        (0..count)
            .map(|i| {
                let filled_at = base + Duration::days(i as i64 * 3);
                let log = FuelLog {
                    id: format!("{}-fuel-{i:04}", vehicle.id),
                    tenant_id: vehicle.tenant_id.clone(),
                    vehicle_id: vehicle.id.clone(),
                    filled_at,
                    liters: 30.0 + (i % 7) as f64 * 2.5,
                    total_cost: 5_000 + (i as i64 % 11) * 175,
                    odometer: 10_000 + i as i64 * 420,
                    station: Some(STATIONS[i % STATIONS.len()].to_string()),
                    notes: None,
                    created_at: filled_at,
                };
                self.insert_fuel_log(log.clone());
                log
            })
            .collect()
    }
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn window_of<T>(rows: Vec<T>, window: PageWindow) -> PageSlice<T> {
    let total = rows.len() as u64;
    let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
    let take = usize::try_from(window.take).unwrap_or(usize::MAX);
    PageSlice::new(rows.into_iter().skip(skip).take(take).collect(), total)
}

fn compare_vehicles(a: &Vehicle, b: &Vehicle, field: VehicleSortField) -> Ordering {
    match field {
        VehicleSortField::Name => a.name.cmp(&b.name),
        VehicleSortField::Make => a.make.cmp(&b.make),
        VehicleSortField::Model => a.model.cmp(&b.model),
        VehicleSortField::Year => a.year.cmp(&b.year),
        VehicleSortField::LicensePlate => a.license_plate.cmp(&b.license_plate),
        VehicleSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn compare_fuel_logs(a: &FuelLog, b: &FuelLog, field: FuelLogSortField) -> Ordering {
    match field {
        FuelLogSortField::FilledAt => a.filled_at.cmp(&b.filled_at),
        FuelLogSortField::Liters => a.liters.total_cmp(&b.liters),
        FuelLogSortField::TotalCost => a.total_cost.cmp(&b.total_cost),
        FuelLogSortField::Odometer => a.odometer.cmp(&b.odometer),
    }
}

#[async_trait]
impl VehicleRepository for InMemoryFleetStore {
    async fn find_page(
        &self,
        tenant_id: &str,
        window: PageWindow,
        filter: &VehicleFilter,
    ) -> DomainResult<PageSlice<Vehicle>> {
        let mut rows: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.tenant_id == tenant_id)
            .filter(|v| filter.search().map_or(true, |q| v.matches_search(q)))
            .map(|v| v.value().clone())
            .collect();

        let field = filter.sort_field().unwrap_or_default();
        rows.sort_by(|a, b| {
            apply_order(compare_vehicles(a, b, field), filter.sort_order())
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(window_of(rows, window))
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self
            .vehicles
            .get(id)
            .filter(|v| v.tenant_id == tenant_id)
            .map(|v| v.value().clone()))
    }
}

#[async_trait]
impl FuelLogRepository for InMemoryFleetStore {
    async fn find_page(
        &self,
        tenant_id: &str,
        vehicle_id: &str,
        window: PageWindow,
        filter: &FuelLogFilter,
    ) -> DomainResult<PageSlice<FuelLog>> {
        let mut rows: Vec<FuelLog> = self
            .fuel_logs
            .iter()
            .filter(|l| l.tenant_id == tenant_id && l.vehicle_id == vehicle_id)
            .filter(|l| filter.search().map_or(true, |q| l.matches_search(q)))
            .map(|l| l.value().clone())
            .collect();

        let field = filter.sort_field().unwrap_or_default();
        rows.sort_by(|a, b| {
            apply_order(compare_fuel_logs(a, b, field), filter.sort_order())
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(window_of(rows, window))
    }
}

impl RepositoryProvider for InMemoryFleetStore {
    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn fuel_logs(&self) -> &dyn FuelLogRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::{Normalizer, RawListParams};

    fn filter(raw: RawListParams) -> VehicleFilter {
        Normalizer::default().filter(&raw)
    }

    #[tokio::test]
    async fn total_counts_rows_before_windowing() {
        let store = InMemoryFleetStore::new();
        store.seed_vehicles("acme", 25);

        let slice = VehicleRepository::find_page(
            &store,
            "acme",
            PageWindow { skip: 20, take: 10 },
            &filter(RawListParams::default()),
        )
        .await
        .unwrap();

        assert_eq!(slice.total, 25);
        assert_eq!(slice.rows.len(), 5);
    }

    #[tokio::test]
    async fn default_order_is_newest_first() {
        let store = InMemoryFleetStore::new();
        let seeded = store.seed_vehicles("acme", 3);

        let slice = VehicleRepository::find_page(
            &store,
            "acme",
            PageWindow { skip: 0, take: 10 },
            &filter(RawListParams::default()),
        )
        .await
        .unwrap();

        let ids: Vec<&str> = slice.rows.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                seeded[2].id.as_str(),
                seeded[1].id.as_str(),
                seeded[0].id.as_str()
            ]
        );
    }

    #[tokio::test]
    async fn huge_skip_yields_empty_slice() {
        let store = InMemoryFleetStore::new();
        store.seed_vehicles("acme", 5);

        let slice = VehicleRepository::find_page(
            &store,
            "acme",
            PageWindow { skip: u64::MAX, take: 10 },
            &filter(RawListParams::default()),
        )
        .await
        .unwrap();

        assert!(slice.rows.is_empty());
        assert_eq!(slice.total, 5);
    }

    #[tokio::test]
    async fn find_by_id_is_tenant_scoped() {
        let store = InMemoryFleetStore::new();
        let seeded = store.seed_vehicles("acme", 1);

        assert!(store.find_by_id("acme", &seeded[0].id).await.unwrap().is_some());
        assert!(store.find_by_id("globex", &seeded[0].id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fuel_logs_sort_by_liters() {
        let store = InMemoryFleetStore::new();
        let vehicle = store.seed_vehicles("acme", 1).remove(0);
        store.seed_fuel_logs(&vehicle, 10);

        let filter: FuelLogFilter = Normalizer::default().filter(&RawListParams {
            sort: Some("liters".into()),
            order: Some("ASC".into()),
            ..RawListParams::default()
        });
        let slice = FuelLogRepository::find_page(
            &store,
            "acme",
            &vehicle.id,
            PageWindow { skip: 0, take: 10 },
            &filter,
        )
        .await
        .unwrap();

        let liters: Vec<f64> = slice.rows.iter().map(|l| l.liters).collect();
        assert!(liters.windows(2).all(|w| w[0] <= w[1]));
    }
}
