pub mod fleet;
pub mod listing;

pub use fleet::FleetService;
pub use listing::paginate;
