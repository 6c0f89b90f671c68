pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use serde::{Deserialize, Serialize};
use tracing::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./fleet.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./fleet.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections.max(1))
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_helper_builds_rwc_url() {
        let config = DatabaseConfig::sqlite("/tmp/fleet.db");
        assert_eq!(config.url, "sqlite:///tmp/fleet.db?mode=rwc");
        assert_eq!(config.max_connections, 10);
    }
}
