//! Broadcast fan-out of driver notices
//!
//! Every notice handed to the bus is stamped into an [`EventMessage`] and
//! delivered to all current subscribers. Slow subscribers skip what they
//! missed instead of blocking the kiosk.

use std::sync::Arc;

use log::{trace, warn};
use tokio::sync::broadcast::{self, error::RecvError};

use super::events::EventMessage;
use crate::application::ports::{NotificationSink, Notice};

const DEFAULT_CAPACITY: usize = 256;

pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns how many subscribers the notice reached.
    pub fn publish(&self, notice: Notice) -> usize {
        let message = EventMessage::new(notice);
        let kind = message.notice.notice_type();
        let reached = self.sender.send(message).unwrap_or(0);
        trace!("notice {} delivered to {} subscriber(s)", kind, reached);
        reached
    }

    /// Subscribers only see notices published after this call.
    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            missed: 0,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl NotificationSink for EventBus {
    fn notify(&self, notice: &Notice) {
        self.publish(notice.clone());
    }
}

pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    missed: u64,
}

impl EventSubscriber {
    /// Next message, or `None` once the bus is gone and drained.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(RecvError::Lagged(skipped)) => {
                    self.missed += skipped;
                    warn!("notice subscriber fell behind, skipped {}", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Notices dropped because this subscriber lagged.
    pub fn missed(&self) -> u64 {
        self.missed
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::default())
}
