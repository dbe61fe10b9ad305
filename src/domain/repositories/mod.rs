//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to the spot and ticket stores
//! - `DomainResult`: standard result type for domain operations

use super::spot::SpotStore;
use super::ticket::TicketStore;
use crate::support::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain stores.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let spot = repos.spots().find_lowest_available(VehicleCategory::Car).await?;
///     let open = repos.tickets().find_open_for_vehicle("ABCDEF").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn spots(&self) -> &dyn SpotStore;
    fn tickets(&self) -> &dyn TicketStore;
}
