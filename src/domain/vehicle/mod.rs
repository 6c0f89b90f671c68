//! Vehicle aggregate

pub mod model;
pub mod repository;

pub use model::{Vehicle, VehicleFilter, VehicleSortField, VehicleStatus};
pub use repository::VehicleRepository;
