pub mod fuel_logs;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod vehicles;
