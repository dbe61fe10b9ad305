pub mod dto;
pub mod ports;
pub mod services;

// Re-export key types for convenience
pub use ports::{InputSource, NotificationSink, Notice, LOYALTY_WELCOME_MESSAGE};
pub use services::{ParkingService, SpotAllocator, TicketLedger};
