//! Fleet service runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, storage
//! (SQLite via SeaORM, or a seeded in-memory store), REST API and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::FleetService;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, InMemoryFleetStore, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, ApiContext};
use crate::shared::errors::{AppResult, InfraError};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Where list data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// SQLite/SeaORM at `database.url`
    Database { auto_migrate: bool },
    /// In-memory store seeded with demo tenants
    Demo { vehicles_per_tenant: usize },
}

impl Default for StorageMode {
    fn default() -> Self {
        Self::Database { auto_migrate: true }
    }
}

/// Options for starting the fleet service.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    pub config: AppConfig,
    pub storage: StorageMode,
}

/// Demo tenants created in [`StorageMode::Demo`].
pub const DEMO_TENANTS: [&str; 2] = ["acme", "globex"];

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running fleet service.
///
/// ```rust,no_run
/// use fleet_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Address the API is bound to (port resolved when configured as 0)
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service:
    /// 1. install the Prometheus recorder (once per process)
    /// 2. open storage, running migrations if requested
    /// 3. bind and serve the REST API
    pub async fn start(opts: ServerOptions) -> AppResult<Self> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting fleet service...");
        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            match opts.storage {
                StorageMode::Database { auto_migrate } => {
                    let db = init_database(&app_cfg.database)
                        .await
                        .map_err(InfraError::from)?;
                    if auto_migrate {
                        info!("Running database migrations...");
                        Migrator::up(&db, None).await.map_err(InfraError::from)?;
                        info!("Migrations completed");
                    }
                    (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
                }
                StorageMode::Demo {
                    vehicles_per_tenant,
                } => {
                    warn!("Serving seeded in-memory demo data; nothing is persisted");
                    (Arc::new(demo_store(vehicles_per_tenant)), None)
                }
            };

        // ── REST API ───────────────────────────────────────────
        let fleet = Arc::new(FleetService::new(repos.clone()));
        let api_router = create_api_router(ApiContext {
            fleet,
            pagination: app_cfg.pagination.clone(),
            db: db.clone(),
            prometheus: prometheus_handle,
        });

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr)
            .await
            .map_err(InfraError::from)?;
        let local_addr = listener.local_addr().map_err(InfraError::from)?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until the API has stopped, then release storage.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to drain
    /// after the signal fires; the task is aborted past that.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;
        let abort = api_task.abort_handle();

        tokio::select! {
            result = api_task => log_api_exit(result),
            _ = async {
                shutdown.signal().wait().await;
                tokio::time::sleep(shutdown.timeout()).await;
            } => {
                warn!("Shutdown timeout of {:?} elapsed, aborting REST API", shutdown.timeout());
                abort.abort();
            }
        }

        if let Some(db) = db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Fleet service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down fleet service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn log_api_exit(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API stopped"),
        Err(e) => error!("REST API task panicked: {}", e),
    }
}

/// The global recorder can only be installed once per process; later
/// starts in the same process reuse it. `None` if installation failed.
pub(crate) fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

/// In-memory store with [`DEMO_TENANTS`], each owning
/// `vehicles_per_tenant` vehicles and a fuel history for the first few.
pub fn demo_store(vehicles_per_tenant: usize) -> InMemoryFleetStore {
    let store = InMemoryFleetStore::new();
    for tenant in DEMO_TENANTS {
        let vehicles = store.seed_vehicles(tenant, vehicles_per_tenant);
        for vehicle in vehicles.iter().take(3) {
            store.seed_fuel_logs(vehicle, 40);
        }
    }
    store
}

/// Install the global tracing subscriber from the logging config.
/// `RUST_LOG` overrides `logging.level`.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ephemeral_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".to_string();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 1;
        config
    }

    #[tokio::test]
    async fn demo_mode_starts_and_stops() {
        let handle = ServerHandle::start(ServerOptions {
            config: ephemeral_config(),
            storage: StorageMode::Demo {
                vehicles_per_tenant: 5,
            },
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        tokio::time::timeout(std::time::Duration::from_secs(5), handle.shutdown())
            .await
            .expect("shutdown should complete");
    }

    #[tokio::test]
    async fn database_mode_migrates_in_memory_sqlite() {
        let mut config = ephemeral_config();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;

        let handle = ServerHandle::start(ServerOptions {
            config,
            storage: StorageMode::Database { auto_migrate: true },
        })
        .await
        .unwrap();

        let filter = crate::shared::pagination::Normalizer::default()
            .filter(&crate::shared::pagination::RawListParams::default());
        let slice = handle
            .repos
            .vehicles()
            .find_page("acme", filter.window(), &filter)
            .await
            .unwrap();
        assert_eq!(slice.total, 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let mut config = ephemeral_config();
        config.pagination.vehicles.default_limit = 500;

        let result = ServerHandle::start(ServerOptions {
            config,
            storage: StorageMode::Demo {
                vehicles_per_tenant: 1,
            },
        })
        .await;
        assert!(matches!(result, Err(crate::shared::errors::AppError::Config(_))));
    }

    #[tokio::test]
    async fn demo_store_seeds_every_tenant() {
        let store = demo_store(4);
        let filter = crate::shared::pagination::Normalizer::default()
            .filter(&crate::shared::pagination::RawListParams::default());

        for tenant in DEMO_TENANTS {
            let slice = store
                .vehicles()
                .find_page(tenant, filter.window(), &filter)
                .await
                .unwrap();
            assert_eq!(slice.total, 4);
        }
    }
}
