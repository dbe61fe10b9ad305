pub mod fare;
pub mod repositories;
pub mod spot;
pub mod ticket;
pub mod vehicle;

// Re-export commonly used types
pub use fare::{format_price, FareCalculator, FareRates};
pub use repositories::{DomainResult, RepositoryProvider};
pub use spot::{provision_layout, ParkingSpot, SpotStore};
pub use ticket::{Ticket, TicketStore};
pub use vehicle::VehicleCategory;

// Re-export DomainError from support for convenience
pub use crate::support::errors::{DomainError, ErrorKind};
