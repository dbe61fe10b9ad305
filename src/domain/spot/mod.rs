//! Parking spot aggregate
//!
//! Contains the ParkingSpot entity, facility provisioning and store interface.

pub mod model;
pub mod repository;

pub use model::{provision_layout, ParkingSpot};
pub use repository::SpotStore;
