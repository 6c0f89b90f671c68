//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod fuel_log_repository;
pub mod repository_provider;
pub mod vehicle_repository;

pub use fuel_log_repository::FuelLogRepository as SeaOrmFuelLogRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use vehicle_repository::VehicleRepository as SeaOrmVehicleRepository;

use sea_orm::sea_query::{LikeExpr, Order};

use crate::shared::pagination::SortOrder;

/// `%needle%` with LIKE wildcards in `needle` matched literally.
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

fn sea_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;

    /// Fresh migrated in-memory SQLite database.
    pub async fn memory_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        // every pooled connection would otherwise get its own empty database
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
