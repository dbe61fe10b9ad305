//! Database entities module

pub mod parking_spot;
pub mod ticket;

pub use parking_spot::Entity as ParkingSpot;
pub use ticket::Entity as Ticket;
