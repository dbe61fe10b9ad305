//! # Park-It
//!
//! Core of a small parking facility: spot allocation, ticket issuance and
//! fare calculation behind a kiosk-style front end.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Spots, tickets, vehicle categories, fare rules and store traits
//! - **application**: Check-in / check-out orchestration and its ports
//! - **infrastructure**: In-memory and SQLite (SeaORM) stores
//! - **notifications**: Broadcast bus for driver notices
//! - **server**: Startup wiring shared by front ends

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

// Re-export notifications
pub use notifications::{create_event_bus, EventBus, SharedEventBus};

pub use support::errors::{AppError, DomainError, ErrorKind};
