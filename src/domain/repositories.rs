//! Repository access for the domain layer

use super::fuel_log::FuelLogRepository;
use super::vehicle::VehicleRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let page = repos.vehicles().find_page("tenant-1", window, &filter).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn fuel_logs(&self) -> &dyn FuelLogRepository;
}
