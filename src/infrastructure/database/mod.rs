pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./parkit.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./parkit.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }

    /// Private in-memory database, gone when the connection closes
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Connect and bring the schema up to date
pub async fn init_database_with_migrations(
    config: &DatabaseConfig,
) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db = init_database(config).await?;
    info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    info!("Migrations completed");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::{
        DomainError, ParkingSpot, RepositoryProvider, Ticket, VehicleCategory,
    };

    async fn repos() -> SeaOrmRepositoryProvider {
        let db = init_database_with_migrations(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory sqlite");
        let repos = SeaOrmRepositoryProvider::new(db);
        for spot in crate::domain::provision_layout(3, 2) {
            repos.spots().save(spot).await.unwrap();
        }
        repos
    }

    #[tokio::test]
    async fn spot_store_contract() {
        let repos = repos().await;
        let spots = repos.spots();

        assert_eq!(spots.find_all().await.unwrap().len(), 5);
        assert_eq!(
            spots
                .find_lowest_available(VehicleCategory::Bike)
                .await
                .unwrap()
                .unwrap()
                .id,
            4
        );

        spots.set_availability(1, false).await.unwrap();
        let next = spots
            .find_lowest_available(VehicleCategory::Car)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(spots.count_available(VehicleCategory::Car).await.unwrap(), 2);
        assert!(!spots.find_by_id(1).await.unwrap().unwrap().is_available);

        assert!(matches!(
            spots.set_availability(99, true).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn ticket_store_contract() {
        let repos = repos().await;
        let tickets = repos.tickets();
        let spot = ParkingSpot::new(1, VehicleCategory::Car);
        let in_time = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

        let mut first = tickets
            .insert(Ticket::open(spot.clone(), "ABCDEF", in_time, false))
            .await
            .unwrap();
        assert!(first.id > 0);
        assert_eq!(
            tickets.find_open_for_vehicle("ABCDEF").await.unwrap().unwrap().id,
            first.id
        );

        first.out_time = Some(in_time + Duration::hours(2));
        first.price = 3.0;
        tickets.update(first.clone()).await.unwrap();
        assert!(tickets.find_open_for_vehicle("ABCDEF").await.unwrap().is_none());

        let second = tickets
            .insert(Ticket::open(
                spot,
                "ABCDEF",
                in_time + Duration::hours(5),
                true,
            ))
            .await
            .unwrap();

        let latest = tickets.find_latest_for_vehicle("ABCDEF").await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert!(latest.discount_eligible);
        assert_eq!(latest.spot.category, VehicleCategory::Car);

        let stored_first = tickets.find_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(stored_first.out_time, first.out_time);
        assert_eq!(stored_first.price, 3.0);

        assert_eq!(tickets.count_for_vehicle("ABCDEF").await.unwrap(), 2);
        assert_eq!(tickets.count_for_vehicle("ZZZ").await.unwrap(), 0);
        let history = tickets.find_by_vehicle("ABCDEF").await.unwrap();
        assert_eq!(
            history.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }
}
