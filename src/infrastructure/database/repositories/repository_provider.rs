//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{RepositoryProvider, SpotStore, TicketStore};

use super::spot_repository::SeaOrmSpotRepository;
use super::ticket_repository::SeaOrmTicketRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate store accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let spot = repos.spots().find_lowest_available(VehicleCategory::Car).await?;
/// let open = repos.tickets().find_open_for_vehicle("ABCDEF").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    spots: SeaOrmSpotRepository,
    tickets: SeaOrmTicketRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            spots: SeaOrmSpotRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn spots(&self) -> &dyn SpotStore {
        &self.spots
    }

    fn tickets(&self) -> &dyn TicketStore {
        &self.tickets
    }
}
