//! HTTP REST API
//!
//! - `common`: response wrapper, error mapping, list query extractor
//! - `modules`: per-resource DTOs and handlers, health, metrics, request id
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiContext, ApiDoc};
