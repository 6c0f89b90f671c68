//! Fuel log aggregate

pub mod model;
pub mod repository;

pub use model::{FuelLog, FuelLogFilter, FuelLogSortField};
pub use repository::FuelLogRepository;
