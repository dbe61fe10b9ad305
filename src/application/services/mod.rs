//! Application services

mod parking;
mod spot_allocator;
mod ticket_ledger;

pub use parking::ParkingService;
pub use spot_allocator::SpotAllocator;
pub use ticket_ledger::TicketLedger;
