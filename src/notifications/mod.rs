//! Notifications module
//!
//! Fans out driver notices to any number of subscribers and can keep a
//! JSON-lines journal of them.
//!
//! # Usage
//! ```ignore
//! use parkit::application::Notice;
//! use parkit::notifications::{create_event_bus, spawn_event_journal};
//!
//! let event_bus = create_event_bus();
//! let mut display = event_bus.subscribe();
//! let journal = spawn_event_journal(event_bus.subscribe(), "events.jsonl".into());
//!
//! event_bus.publish(Notice::LoyaltyWelcome {
//!     vehicle_reg_number: "ABCDEF".to_string(),
//! });
//! let message = display.recv().await;
//! ```

pub mod event_bus;
pub mod events;
pub mod journal;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::EventMessage;
pub use journal::{run_event_journal, spawn_event_journal};
