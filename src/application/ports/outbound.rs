//! Outbound port: user-visible notices emitted by the parking core
//!
//! [`NotificationSink`] decouples the services from whatever displays the
//! messages: the console kiosk prints them, the [`EventBus`] fans them out
//! to subscribers, tests record them.
//!
//! [`EventBus`]: crate::notifications::EventBus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::format_price;

pub const LOYALTY_WELCOME_MESSAGE: &str =
    "Welcome back! As a recurring user of our parking lot, you'll benefit from a 5% discount.";

// ── Notice ─────────────────────────────────────────────────────

/// A message for the driver at the kiosk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Notice {
    /// Recurring customer checked in
    LoyaltyWelcome { vehicle_reg_number: String },
    /// Ticket issued and spot reserved for the vehicle
    SpotAssigned {
        ticket_id: i32,
        spot_id: i32,
        vehicle_reg_number: String,
        in_time: DateTime<Utc>,
    },
    /// Amount to pay at exit
    FareDue {
        ticket_id: i32,
        vehicle_reg_number: String,
        price: f64,
    },
    /// Exit time stamped on the ticket
    ExitRecorded {
        vehicle_reg_number: String,
        out_time: DateTime<Utc>,
    },
}

impl Notice {
    pub fn notice_type(&self) -> &'static str {
        match self {
            Self::LoyaltyWelcome { .. } => "loyalty_welcome",
            Self::SpotAssigned { .. } => "spot_assigned",
            Self::FareDue { .. } => "fare_due",
            Self::ExitRecorded { .. } => "exit_recorded",
        }
    }

    pub fn vehicle_reg_number(&self) -> &str {
        match self {
            Self::LoyaltyWelcome { vehicle_reg_number }
            | Self::SpotAssigned {
                vehicle_reg_number, ..
            }
            | Self::FareDue {
                vehicle_reg_number, ..
            }
            | Self::ExitRecorded {
                vehicle_reg_number, ..
            } => vehicle_reg_number,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoyaltyWelcome { .. } => write!(f, "{}", LOYALTY_WELCOME_MESSAGE),
            Self::SpotAssigned {
                spot_id,
                vehicle_reg_number,
                in_time,
                ..
            } => write!(
                f,
                "Please park your vehicle in spot number: {}\n\
                 Recorded in-time for vehicle number: {} is: {}",
                spot_id, vehicle_reg_number, in_time
            ),
            Self::FareDue { price, .. } => {
                write!(f, "Please pay the parking fare: {}", format_price(*price))
            }
            Self::ExitRecorded {
                vehicle_reg_number,
                out_time,
            } => write!(
                f,
                "Recorded out-time for vehicle number: {} is: {}",
                vehicle_reg_number, out_time
            ),
        }
    }
}

// ── NotificationSink ───────────────────────────────────────────

/// Receives notices in the order the services emit them.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loyalty_text_is_stable() {
        let notice = Notice::LoyaltyWelcome {
            vehicle_reg_number: "ABCDEF".into(),
        };
        assert_eq!(notice.to_string(), LOYALTY_WELCOME_MESSAGE);
        assert_eq!(notice.notice_type(), "loyalty_welcome");
        assert_eq!(notice.vehicle_reg_number(), "ABCDEF");
    }

    #[test]
    fn fare_due_formats_two_decimals() {
        let notice = Notice::FareDue {
            ticket_id: 1,
            vehicle_reg_number: "ABCDEF".into(),
            price: 1.5,
        };
        assert_eq!(notice.to_string(), "Please pay the parking fare: 1.50");
    }

    #[test]
    fn serializes_with_type_tag() {
        let notice = Notice::FareDue {
            ticket_id: 7,
            vehicle_reg_number: "ABCDEF".into(),
            price: 0.0,
        };
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["type"], "fare_due");
        assert_eq!(json["data"]["ticket_id"], 7);
    }
}
