//! Ticket domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ParkingSpot;

/// Record of one parking session for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Assigned by the ticket store on insert (0 until then)
    pub id: i32,
    /// Spot the vehicle was parked in
    pub spot: ParkingSpot,
    pub vehicle_reg_number: String,
    /// Check-in time
    pub in_time: DateTime<Utc>,
    /// Check-out time, absent while the vehicle is parked
    pub out_time: Option<DateTime<Utc>>,
    /// Fare in currency units, 0 until checkout
    pub price: f64,
    /// Recurring customer, billed with the loyalty discount
    pub discount_eligible: bool,
}

impl Ticket {
    pub fn open(
        spot: ParkingSpot,
        vehicle_reg_number: impl Into<String>,
        in_time: DateTime<Utc>,
        discount_eligible: bool,
    ) -> Self {
        Self {
            id: 0,
            spot,
            vehicle_reg_number: vehicle_reg_number.into(),
            in_time,
            out_time: None,
            price: 0.0,
            discount_eligible,
        }
    }

    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }

    /// Whole seconds between check-in and check-out.
    pub fn duration_seconds(&self) -> Option<i64> {
        self.out_time.map(|out| (out - self.in_time).num_seconds())
    }
}

// ── Tests ──────────────────────────────────────────────────────
