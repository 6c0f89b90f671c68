//! # Fleet Service
//!
//! Tenant-scoped fleet read API built around one offset-pagination contract:
//! untrusted `page` / `limit` / `q` / `sort` / `order` query fields are
//! normalized into canonical options (never rejected), storage fetches a
//! window, and every list response carries `{data, meta}` navigation
//! metadata.
//!
//! ## Architecture
//!
//! - **shared**: pagination contract, errors, shutdown signalling
//! - **domain**: read models, sort allow-lists, repository traits
//! - **application**: list use-cases
//! - **infrastructure**: SeaORM (SQLite) and in-memory storage
//! - **interfaces**: axum REST API with Swagger documentation
//! - **config** / **server**: TOML configuration and runtime lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, resolve_config_path, AppConfig, ConfigError};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryFleetStore, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;

pub use shared::pagination::{
    FilterOptions, Normalizer, PageLinks, Pagination, PaginationConfig, PaginationMeta,
    PaginationOptions, RawListParams, SortOrder,
};
