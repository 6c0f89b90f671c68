pub mod fuel_log;
pub mod repositories;
pub mod vehicle;

pub use fuel_log::{FuelLog, FuelLogFilter, FuelLogRepository, FuelLogSortField};
pub use repositories::{DomainResult, RepositoryProvider};
pub use vehicle::{Vehicle, VehicleFilter, VehicleRepository, VehicleSortField, VehicleStatus};

pub use crate::shared::errors::DomainError;
