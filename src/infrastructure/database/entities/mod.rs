//! Database entities module

pub mod fuel_log;
pub mod vehicle;

pub use fuel_log::Entity as FuelLog;
pub use vehicle::Entity as Vehicle;
