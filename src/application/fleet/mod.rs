//! Fleet read use-cases

mod service;

pub use service::FleetService;
