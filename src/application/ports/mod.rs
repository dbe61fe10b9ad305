//! Application ports (hexagonal architecture boundaries)
//!
//! - `inbound`: input collected from the kiosk operator
//! - `outbound`: notices sent back to the driver

pub mod inbound;
pub mod outbound;

pub use inbound::InputSource;
pub use outbound::{NotificationSink, Notice, LOYALTY_WELCOME_MESSAGE};
