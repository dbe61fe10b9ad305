//! Fare calculation for a completed stay

use super::model::FareRates;
use crate::domain::{DomainResult, Ticket};
use crate::support::errors::DomainError;

/// Pure fare computation over a closed ticket.
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    rates: FareRates,
}

impl FareCalculator {
    pub fn new(rates: FareRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &FareRates {
        &self.rates
    }

    /// Price of the stay recorded on `ticket`.
    ///
    /// Stays within the grace period are free. Longer stays are billed
    /// pro rata at the hourly rate of the spot's category, and the loyalty
    /// discount is applied last.
    pub fn compute_fare(&self, ticket: &Ticket) -> DomainResult<f64> {
        let out_time = ticket.out_time.ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "ticket {} has no out time",
                ticket.id
            ))
        })?;
        if out_time < ticket.in_time {
            return Err(DomainError::InvalidInput(format!(
                "out time provided is incorrect: {} is before in time {}",
                out_time, ticket.in_time
            )));
        }

        let duration = (out_time - ticket.in_time).num_seconds();
        let mut price = if duration > self.rates.free_duration_secs {
            duration as f64 / 3600.0 * self.rates.rate_for(ticket.spot.category)
        } else {
            0.0
        };

        if ticket.discount_eligible {
            price *= self.rates.discount_multiplier;
        }
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParkingSpot, VehicleCategory};
    use chrono::{Duration, TimeZone, Utc};

    fn ticket(category: VehicleCategory, stay_secs: i64, discount: bool) -> Ticket {
        let in_time = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut t = Ticket::open(ParkingSpot::new(1, category), "ABCDEF", in_time, discount);
        t.out_time = Some(in_time + Duration::seconds(stay_secs));
        t
    }

    fn calc() -> FareCalculator {
        FareCalculator::default()
    }

    #[test]
    fn car_under_grace_period_is_free() {
        assert_eq!(calc().compute_fare(&ticket(VehicleCategory::Car, 1799, false)).unwrap(), 0.0);
    }

    #[test]
    fn exactly_grace_period_is_free() {
        assert_eq!(calc().compute_fare(&ticket(VehicleCategory::Bike, 1800, true)).unwrap(), 0.0);
    }

    #[test]
    fn one_hour_car() {
        let price = calc().compute_fare(&ticket(VehicleCategory::Car, 3600, false)).unwrap();
        assert!((price - 1.5).abs() < 1e-9);
    }

    #[test]
    fn one_hour_car_with_discount() {
        let price = calc().compute_fare(&ticket(VehicleCategory::Car, 3600, true)).unwrap();
        assert!((price - 0.95 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn forty_five_minutes_bike() {
        let price = calc().compute_fare(&ticket(VehicleCategory::Bike, 45 * 60, false)).unwrap();
        assert!((price - 0.75).abs() < 1e-9);
    }

    #[test]
    fn one_day_car() {
        let price = calc().compute_fare(&ticket(VehicleCategory::Car, 24 * 3600, false)).unwrap();
        assert!((price - 36.0).abs() < 1e-9);
    }

    #[test]
    fn missing_out_time_is_invalid_input() {
        let mut t = ticket(VehicleCategory::Car, 3600, false);
        t.out_time = None;
        assert!(matches!(calc().compute_fare(&t), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn out_time_before_in_time_is_invalid_input() {
        let t = ticket(VehicleCategory::Bike, -60, false);
        assert!(matches!(calc().compute_fare(&t), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn custom_rates_are_used() {
        let calc = FareCalculator::new(FareRates {
            car_rate_per_hour: 4.0,
            ..FareRates::default()
        });
        let price = calc.compute_fare(&ticket(VehicleCategory::Car, 7200, false)).unwrap();
        assert!((price - 8.0).abs() < 1e-9);
    }
}
