//! Fleet service — CLI
//!
//! Headless REST server for tenant fleet data, plus offline helpers for the
//! pagination contract.
//!
//! ```sh
//! # Run with default config (~/.config/fleet-service/config.toml)
//! fleet-service
//!
//! # Serve seeded in-memory data, no database
//! fleet-service --demo
//!
//! # Validate config without starting
//! fleet-service --config /etc/fleet-service/config.toml --check
//!
//! # Navigation metadata for page 2 of 25 rows, 10 per page
//! fleet-service meta --page 2 --limit 10 --count 25
//!
//! # What the server makes of a query string
//! fleet-service normalize --resource vehicles 'page=abc&limit=500&q=van'
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::{error, info};

use fleet_service::config::{resolve_config_path, AppConfig, CONFIG_ENV};
use fleet_service::domain::{FuelLogSortField, VehicleSortField};
use fleet_service::server::{init_tracing, ServerHandle, ServerOptions, StorageMode};
use fleet_service::shared::pagination::{
    FilterOptions, Normalizer, PaginationConfig, PaginationMeta, PaginationOptions,
    RawListParams, SortKey,
};

/// Fleet service — tenant-scoped fleet read API.
#[derive(Parser, Debug)]
#[command(
    name = "fleet-service",
    version,
    about = "Tenant fleet REST API with offset pagination",
    long_about = "Fleet service: read-only REST API over tenant vehicles and \
                  fuel logs.\n\nDefault config: ~/.config/fleet-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV, global = true)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Serve seeded in-memory data instead of the database.
    #[arg(long)]
    demo: bool,

    /// Vehicles per demo tenant.
    #[arg(long, default_value_t = 42, requires = "demo")]
    demo_vehicles: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the `meta` block a list response would carry.
    Meta {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
        /// Total matching rows
        #[arg(long)]
        count: u64,
    },
    /// Normalize a raw query string the way the list endpoints do.
    Normalize {
        #[arg(long, value_enum, default_value_t = Resource::Vehicles)]
        resource: Resource,
        /// e.g. `page=2&limit=20&q=van&order=ASC`
        query: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Resource {
    Vehicles,
    FuelLogs,
}

fn meta_json(page: u64, limit: u64, count: u64) -> Result<Value, Box<dyn std::error::Error>> {
    let options = PaginationOptions::try_new(page, limit, &PaginationConfig::default())?;
    Ok(serde_json::to_value(PaginationMeta::for_options(&options, count))?)
}

fn filter_json<F: SortKey>(options: &FilterOptions<F>) -> Value {
    json!({
        "page": options.page(),
        "limit": options.limit(),
        "q": options.query(),
        "sort": options.sort_field().map(|f| f.as_str()),
        "order": options.sort_order().as_str(),
        "query_string": options.query_string(),
    })
}

fn normalize_json(config: &AppConfig, resource: Resource, query: &str) -> Value {
    let raw = RawListParams::from_query_str(query);
    match resource {
        Resource::Vehicles => {
            let options: FilterOptions<VehicleSortField> =
                Normalizer::new(config.pagination.vehicles.clone()).filter(&raw);
            filter_json(&options)
        }
        Resource::FuelLogs => {
            let options: FilterOptions<FuelLogSortField> =
                Normalizer::new(config.pagination.fuel_logs.clone()).filter(&raw);
            filter_json(&options)
        }
    }
}

fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_deref());

    // ── Offline commands ───────────────────────────────────────
    match &cli.command {
        Some(Command::Meta { page, limit, count }) => {
            println!("{}", serde_json::to_string_pretty(&meta_json(*page, *limit, *count)?)?);
            return Ok(());
        }
        Some(Command::Normalize { resource, query }) => {
            let config = AppConfig::load(&config_path)?;
            let out = normalize_json(&config, *resource, query);
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }
        None => {}
    }

    // ── Load configuration ─────────────────────────────────────
    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            eprintln!("   Config file : {}", config_path.display());
            std::process::exit(1);
        }
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides, then install logging ──────────────
    apply_overrides(&cli, &mut config);
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Vehicles    : limit {} (max {})",
            config.pagination.vehicles.default_limit, config.pagination.vehicles.max_limit
        );
        println!(
            "   Fuel logs   : limit {} (max {})",
            config.pagination.fuel_logs.default_limit, config.pagination.fuel_logs.max_limit
        );
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let storage = if cli.demo {
        StorageMode::Demo {
            vehicles_per_tenant: cli.demo_vehicles,
        }
    } else {
        StorageMode::Database {
            auto_migrate: !cli.no_migrate,
        }
    };
    let handle = ServerHandle::start(ServerOptions { config, storage }).await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
