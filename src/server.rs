//! Reusable parking facility runtime.
//!
//! [`ServerHandle`] owns the pieces every front end needs: the database
//! connection, the repository provider, the notice bus, and the fare
//! calculator built from configuration. Front ends plug in their own input
//! source and notification sink through [`ServerHandle::parking_service`].

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use crate::application::{InputSource, NotificationSink, ParkingService, SpotAllocator};
use crate::config::AppConfig;
use crate::domain::{FareCalculator, RepositoryProvider};
use crate::infrastructure::database::migrator::Migrator;
use crate::support::errors::{AppError, InfraError};
use crate::{create_event_bus, init_database, SeaOrmRepositoryProvider, SharedEventBus};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the facility.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed the configured spot layout into an empty facility (default: true).
    pub provision_spots: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            provision_spots: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a started facility.
///
/// # Examples
///
/// ```rust,no_run
/// use parkit::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... build a ParkingService and serve the kiosk ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Shared bus every notice is mirrored onto.
    pub event_bus: SharedEventBus,
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Configuration the facility was started with.
    pub config: AppConfig,
    calculator: FareCalculator,
    db: DatabaseConnection,
}

impl ServerHandle {
    pub async fn start(options: ServerOptions) -> Result<Self, AppError> {
        let ServerOptions {
            config,
            auto_migrate,
            provision_spots,
        } = options;

        config.fares.validate()?;
        let calculator = FareCalculator::new(config.fares.clone());

        let db = init_database(&config.database_config())
            .await
            .map_err(InfraError::from)?;

        if auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await.map_err(InfraError::from)?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if provision_spots {
            SpotAllocator::new(repos.clone())
                .provision(config.facility.car_spots, config.facility.bike_spots)
                .await?;
        }

        info!(
            car_rate = config.fares.car_rate_per_hour,
            bike_rate = config.fares.bike_rate_per_hour,
            free_duration_secs = config.fares.free_duration_secs,
            "Facility ready"
        );

        Ok(Self {
            event_bus: create_event_bus(),
            repos,
            config,
            calculator,
            db,
        })
    }

    /// Builds a parking service wired to this facility's stores.
    pub fn parking_service(
        &self,
        input: Arc<dyn InputSource>,
        notifier: Arc<dyn NotificationSink>,
    ) -> ParkingService {
        ParkingService::new(
            self.repos.clone(),
            input,
            notifier,
            self.calculator.clone(),
        )
    }

    pub fn calculator(&self) -> &FareCalculator {
        &self.calculator
    }

    /// Closes the database connection.
    pub async fn shutdown(self) {
        info!("Shutting down facility");
        if let Err(e) = self.db.close().await {
            warn!(error = %e, "Error closing database connection");
        }
        info!("Facility stopped");
    }
}

// ── Tracing ────────────────────────────────────────────────────────

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
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
