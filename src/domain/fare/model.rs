//! Fare rate table

use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, VehicleCategory};
use crate::support::errors::DomainError;

pub const CAR_RATE_PER_HOUR: f64 = 1.5;
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;
/// Stays up to this long are free.
pub const FREE_DURATION_SECS: i64 = 1800;
/// Recurring customers pay 95% of the fare.
pub const LOYALTY_DISCOUNT_MULTIPLIER: f64 = 0.95;

/// Pricing constants, fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareRates {
    /// Currency units per hour for cars
    pub car_rate_per_hour: f64,
    /// Currency units per hour for bikes
    pub bike_rate_per_hour: f64,
    /// Grace period in seconds
    pub free_duration_secs: i64,
    /// Applied to the fare of discount-eligible tickets
    pub discount_multiplier: f64,
}

impl Default for FareRates {
    fn default() -> Self {
        Self {
            car_rate_per_hour: CAR_RATE_PER_HOUR,
            bike_rate_per_hour: BIKE_RATE_PER_HOUR,
            free_duration_secs: FREE_DURATION_SECS,
            discount_multiplier: LOYALTY_DISCOUNT_MULTIPLIER,
        }
    }
}

impl FareRates {
    pub fn rate_for(&self, category: VehicleCategory) -> f64 {
        match category {
            VehicleCategory::Car => self.car_rate_per_hour,
            VehicleCategory::Bike => self.bike_rate_per_hour,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        for category in VehicleCategory::ALL {
            let rate = self.rate_for(category);
            if !rate.is_finite() || rate < 0.0 {
                return Err(DomainError::InvalidInput(format!(
                    "{} rate must be a non-negative number, got {}",
                    category, rate
                )));
            }
        }
        if self.free_duration_secs < 0 {
            return Err(DomainError::InvalidInput(
                "free duration must not be negative".to_string(),
            ));
        }
        if !(self.discount_multiplier > 0.0 && self.discount_multiplier <= 1.0) {
            return Err(DomainError::InvalidInput(format!(
                "discount multiplier must be in (0, 1], got {}",
                self.discount_multiplier
            )));
        }
        Ok(())
    }
}

/// Price with two decimals, as printed on the kiosk.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}
