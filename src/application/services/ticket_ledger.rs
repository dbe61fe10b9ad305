//! Ticket bookkeeping over the ticket store

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{DomainResult, FareCalculator, ParkingSpot, RepositoryProvider, Ticket};
use crate::support::errors::DomainError;
use crate::support::time::Clock;

/// Opens, closes and looks up tickets.
pub struct TicketLedger {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
}

impl TicketLedger {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// True if the vehicle has any ticket on record, open or closed.
    pub async fn has_history(&self, vehicle_reg_number: &str) -> DomainResult<bool> {
        Ok(self
            .repos
            .tickets()
            .count_for_vehicle(vehicle_reg_number)
            .await?
            > 0)
    }

    /// Issues a ticket for a vehicle entering `spot` now.
    pub async fn open(&self, spot: &ParkingSpot, vehicle_reg_number: &str) -> DomainResult<Ticket> {
        let discount_eligible = self.has_history(vehicle_reg_number).await?;
        let ticket = Ticket::open(
            spot.clone(),
            vehicle_reg_number,
            self.clock.now(),
            discount_eligible,
        );
        let ticket = self.repos.tickets().insert(ticket).await?;

        info!(
            ticket_id = ticket.id,
            spot_id = spot.id,
            vehicle_reg_number,
            discount_eligible,
            "Ticket opened"
        );
        Ok(ticket)
    }

    /// Stamps the exit time on an open ticket, prices the stay and persists
    /// both. The stored record is the source of truth for whether the ticket
    /// is still open.
    pub async fn close(&self, ticket: &Ticket, calculator: &FareCalculator) -> DomainResult<Ticket> {
        let mut closing = self
            .repos
            .tickets()
            .find_by_id(ticket.id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Ticket",
                field: "id",
                value: ticket.id.to_string(),
            })?;

        if !closing.is_open() {
            return Err(DomainError::InvalidState(format!(
                "ticket {} is already closed",
                ticket.id
            )));
        }

        closing.out_time = Some(self.clock.now());
        closing.price = calculator.compute_fare(&closing)?;
        self.repos.tickets().update(closing.clone()).await?;

        info!(
            ticket_id = closing.id,
            vehicle_reg_number = closing.vehicle_reg_number.as_str(),
            duration_secs = closing.duration_seconds().unwrap_or(0),
            price = closing.price,
            "Ticket closed"
        );
        Ok(closing)
    }

    /// Undoes [`TicketLedger::close`]: clears the exit time and price so the
    /// vehicle is parked again.
    pub async fn reopen(&self, ticket: &Ticket) -> DomainResult<Ticket> {
        let mut reopened = ticket.clone();
        reopened.out_time = None;
        reopened.price = 0.0;
        self.repos.tickets().update(reopened.clone()).await?;

        info!(
            ticket_id = reopened.id,
            vehicle_reg_number = reopened.vehicle_reg_number.as_str(),
            "Ticket reopened"
        );
        Ok(reopened)
    }

    pub async fn find_open_ticket(&self, vehicle_reg_number: &str) -> DomainResult<Ticket> {
        self.open_ticket(vehicle_reg_number)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Ticket",
                field: "vehicle_reg_number",
                value: vehicle_reg_number.to_string(),
            })
    }

    pub async fn open_ticket(&self, vehicle_reg_number: &str) -> DomainResult<Option<Ticket>> {
        let ticket = self
            .repos
            .tickets()
            .find_open_for_vehicle(vehicle_reg_number)
            .await?;
        debug!(vehicle_reg_number, parked = ticket.is_some(), "Open ticket lookup");
        Ok(ticket)
    }

    /// Most recent ticket of the vehicle by check-in time.
    pub async fn latest_ticket(&self, vehicle_reg_number: &str) -> DomainResult<Ticket> {
        self.repos
            .tickets()
            .find_latest_for_vehicle(vehicle_reg_number)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Ticket",
                field: "vehicle_reg_number",
                value: vehicle_reg_number.to_string(),
            })
    }

    pub async fn history(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>> {
        self.repos.tickets().find_by_vehicle(vehicle_reg_number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::domain::VehicleCategory;
    use crate::infrastructure::storage::InMemoryStorage;

    struct StepClock(Mutex<DateTime<Utc>>);

    impl StepClock {
        fn advance(&self, secs: i64) {
            let mut now = self.0.lock().unwrap();
            *now = *now + Duration::seconds(secs);
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn setup() -> (TicketLedger, Arc<StepClock>) {
        let clock = Arc::new(StepClock(Mutex::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        )));
        let ledger = TicketLedger::new(Arc::new(InMemoryStorage::with_layout(2, 1)), clock.clone());
        (ledger, clock)
    }

    fn car_spot() -> ParkingSpot {
        let mut spot = ParkingSpot::new(1, VehicleCategory::Car);
        spot.is_available = false;
        spot
    }

    #[tokio::test]
    async fn first_ticket_is_not_discounted() {
        let (ledger, _) = setup();
        assert!(!ledger.has_history("ABCDEF").await.unwrap());

        let ticket = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        assert_eq!(ticket.id, 1);
        assert!(ticket.is_open());
        assert_eq!(ticket.price, 0.0);
        assert!(!ticket.discount_eligible);
        assert!(ledger.has_history("ABCDEF").await.unwrap());
    }

    #[tokio::test]
    async fn close_stamps_exit_and_price() {
        let (ledger, clock) = setup();
        let ticket = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        clock.advance(3600);

        let closed = ledger.close(&ticket, &FareCalculator::default()).await.unwrap();
        assert_eq!(closed.duration_seconds(), Some(3600));
        assert!((closed.price - 1.5).abs() < 1e-9);

        let stored = ledger.latest_ticket("ABCDEF").await.unwrap();
        assert_eq!(stored, closed);
    }

    #[tokio::test]
    async fn closing_twice_is_invalid_state() {
        let (ledger, clock) = setup();
        let ticket = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        clock.advance(60);
        ledger.close(&ticket, &FareCalculator::default()).await.unwrap();

        // stale copy of the open ticket
        let err = ledger
            .close(&ticket, &FareCalculator::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn find_open_ticket_not_found() {
        let (ledger, clock) = setup();
        assert!(matches!(
            ledger.find_open_ticket("ABCDEF").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));

        let ticket = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        assert_eq!(ledger.find_open_ticket("ABCDEF").await.unwrap().id, ticket.id);

        clock.advance(10);
        ledger.close(&ticket, &FareCalculator::default()).await.unwrap();
        assert!(ledger.find_open_ticket("ABCDEF").await.is_err());
    }

    #[tokio::test]
    async fn returning_vehicle_is_discount_eligible() {
        let (ledger, clock) = setup();
        let first = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        clock.advance(120);
        ledger.close(&first, &FareCalculator::default()).await.unwrap();
        clock.advance(600);

        let second = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        assert!(second.discount_eligible);

        let history = ledger.history("ABCDEF").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
    }

    #[tokio::test]
    async fn reopen_restores_an_open_ticket() {
        let (ledger, clock) = setup();
        let ticket = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        clock.advance(7200);
        let closed = ledger.close(&ticket, &FareCalculator::default()).await.unwrap();
        assert!(closed.price > 0.0);

        let reopened = ledger.reopen(&closed).await.unwrap();
        assert!(reopened.is_open());
        assert_eq!(reopened.price, 0.0);

        let open = ledger.find_open_ticket("ABCDEF").await.unwrap();
        assert_eq!(open.id, ticket.id);
        assert_eq!(open.in_time, ticket.in_time);
    }

    #[tokio::test]
    async fn latest_ticket_follows_check_in_time() {
        let (ledger, clock) = setup();
        assert!(matches!(
            ledger.latest_ticket("ABCDEF").await,
            Err(DomainError::NotFound { .. })
        ));

        let first = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        clock.advance(60);
        let closed = ledger.close(&first, &FareCalculator::default()).await.unwrap();
        assert_eq!(ledger.latest_ticket("ABCDEF").await.unwrap().out_time, closed.out_time);

        clock.advance(60);
        let second = ledger.open(&car_spot(), "ABCDEF").await.unwrap();
        let latest = ledger.latest_ticket("ABCDEF").await.unwrap();
        assert_eq!(latest.id, second.id);
        assert!(latest.is_open());
    }
}
