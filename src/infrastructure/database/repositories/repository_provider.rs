//! SeaORM-backed RepositoryProvider

use sea_orm::DatabaseConnection;

use super::{SeaOrmFuelLogRepository, SeaOrmVehicleRepository};
use crate::domain::{FuelLogRepository, RepositoryProvider, VehicleRepository};

/// Holds one repository per aggregate, all sharing a connection pool.
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    fuel_logs: SeaOrmFuelLogRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            fuel_logs: SeaOrmFuelLogRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn fuel_logs(&self) -> &dyn FuelLogRepository {
        &self.fuel_logs
    }
}
