//! Fuel logs module — per-vehicle refuelling history

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
