//! Notification envelopes
//!
//! Wraps each [`Notice`] with an id and timestamp before it is broadcast.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::Notice;

/// Wrapper for sending notices with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub notice: Notice,
}

impl EventMessage {
    pub fn new(notice: Notice) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            notice,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
