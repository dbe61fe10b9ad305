//! Check-in / check-out orchestration
//!
//! A vehicle is either ABSENT (no open ticket) or PARKED (exactly one open
//! ticket). Check-in moves it to PARKED, check-out back to ABSENT; the
//! closed ticket stays on record as history.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::spot_allocator::SpotAllocator;
use super::ticket_ledger::TicketLedger;
use crate::application::dto::{CheckInRequest, CheckOutRequest};
use crate::application::ports::{InputSource, NotificationSink, Notice};
use crate::domain::{
    DomainResult, FareCalculator, RepositoryProvider, Ticket, VehicleCategory,
};
use crate::support::errors::DomainError;
use crate::support::time::{Clock, SystemClock};

/// Service driving the parking lifecycle of vehicles
pub struct ParkingService {
    input: Arc<dyn InputSource>,
    notifier: Arc<dyn NotificationSink>,
    allocator: SpotAllocator,
    ledger: TicketLedger,
    calculator: FareCalculator,
    vehicle_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ParkingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        input: Arc<dyn InputSource>,
        notifier: Arc<dyn NotificationSink>,
        calculator: FareCalculator,
    ) -> Self {
        Self::with_clock(repos, input, notifier, calculator, Arc::new(SystemClock))
    }

    pub fn with_clock(
        repos: Arc<dyn RepositoryProvider>,
        input: Arc<dyn InputSource>,
        notifier: Arc<dyn NotificationSink>,
        calculator: FareCalculator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            input,
            notifier,
            allocator: SpotAllocator::new(repos.clone()),
            ledger: TicketLedger::new(repos, clock),
            calculator,
            vehicle_locks: DashMap::new(),
        }
    }

    pub fn allocator(&self) -> &SpotAllocator {
        &self.allocator
    }

    pub fn ledger(&self) -> &TicketLedger {
        &self.ledger
    }

    /// Reads the vehicle category and registration number from the input
    /// source, then checks the vehicle in.
    pub async fn process_incoming_vehicle(&self) -> DomainResult<Ticket> {
        let category = self.input.read_vehicle_category().await?;
        let vehicle_reg_number = self.input.read_vehicle_registration_number().await?;
        self.check_in(category, &vehicle_reg_number).await
    }

    /// Reads the registration number from the input source, then checks the
    /// vehicle out.
    pub async fn process_exiting_vehicle(&self) -> DomainResult<Ticket> {
        let vehicle_reg_number = self.input.read_vehicle_registration_number().await?;
        self.check_out(&vehicle_reg_number).await
    }

    pub async fn check_in(
        &self,
        category: VehicleCategory,
        vehicle_reg_number: &str,
    ) -> DomainResult<Ticket> {
        let request = CheckInRequest::new(category, vehicle_reg_number)?;
        let reg = request.vehicle_reg_number.as_str();

        let lock = self.vehicle_lock(reg);
        let result = {
            let _guard = lock.lock().await;
            self.check_in_locked(request.category, reg).await
        };
        drop(lock);
        self.forget_vehicle_lock(reg);
        result
    }

    pub async fn check_out(&self, vehicle_reg_number: &str) -> DomainResult<Ticket> {
        let request = CheckOutRequest::new(vehicle_reg_number)?;
        let reg = request.vehicle_reg_number.as_str();

        let lock = self.vehicle_lock(reg);
        let result = {
            let _guard = lock.lock().await;
            self.check_out_locked(reg).await
        };
        drop(lock);
        self.forget_vehicle_lock(reg);
        result
    }

    async fn check_in_locked(&self, category: VehicleCategory, reg: &str) -> DomainResult<Ticket> {
        if let Some(open) = self.ledger.open_ticket(reg).await? {
            warn!(
                vehicle_reg_number = reg,
                ticket_id = open.id,
                "Check-in rejected: vehicle already parked"
            );
            return Err(DomainError::InvalidState(format!(
                "vehicle {} is already parked in spot {}",
                reg, open.spot.id
            )));
        }

        let spot = self.allocator.allocate(category).await?;

        let ticket = match self.ledger.open(&spot, reg).await {
            Ok(ticket) => ticket,
            Err(e) => {
                // no ticket means the spot must not stay occupied
                if let Err(rollback) = self.allocator.release(spot.id).await {
                    error!(
                        spot_id = spot.id,
                        error = %rollback,
                        "Failed to roll back spot after ticket creation failure"
                    );
                }
                return Err(e);
            }
        };

        if ticket.discount_eligible {
            self.notifier.notify(&Notice::LoyaltyWelcome {
                vehicle_reg_number: reg.to_string(),
            });
        }
        self.notifier.notify(&Notice::SpotAssigned {
            ticket_id: ticket.id,
            spot_id: spot.id,
            vehicle_reg_number: reg.to_string(),
            in_time: ticket.in_time,
        });

        metrics::counter!("parking_check_ins_total", "category" => category.as_str())
            .increment(1);
        let free_spots = self.allocator.availability(category).await.ok();
        info!(
            ticket_id = ticket.id,
            spot_id = spot.id,
            category = category.as_str(),
            free_spots = ?free_spots,
            vehicle_reg_number = reg,
            "Vehicle checked in"
        );

        Ok(ticket)
    }

    async fn check_out_locked(&self, reg: &str) -> DomainResult<Ticket> {
        let ticket = self.ledger.find_open_ticket(reg).await?;
        let closed = self.ledger.close(&ticket, &self.calculator).await?;

        if let Err(e) = self.allocator.release(closed.spot.id).await {
            // spot still occupied, so the vehicle must stay parked
            if let Err(rollback) = self.ledger.reopen(&closed).await {
                error!(
                    ticket_id = closed.id,
                    spot_id = closed.spot.id,
                    error = %rollback,
                    "Failed to reopen ticket after spot release failure"
                );
            }
            warn!(
                ticket_id = closed.id,
                spot_id = closed.spot.id,
                error = %e,
                "Check-out aborted: spot could not be released"
            );
            return Err(e);
        }

        self.notifier.notify(&Notice::FareDue {
            ticket_id: closed.id,
            vehicle_reg_number: reg.to_string(),
            price: closed.price,
        });
        if let Some(out_time) = closed.out_time {
            self.notifier.notify(&Notice::ExitRecorded {
                vehicle_reg_number: reg.to_string(),
                out_time,
            });
        }

        let category = closed.spot.category.as_str();
        metrics::counter!("parking_check_outs_total", "category" => category).increment(1);
        metrics::histogram!("parking_fare", "category" => category).record(closed.price);
        info!(
            ticket_id = closed.id,
            spot_id = closed.spot.id,
            vehicle_reg_number = reg,
            price = closed.price,
            discount = closed.discount_eligible,
            "Vehicle checked out"
        );

        Ok(closed)
    }

    /// All tickets of a vehicle, newest first.
    pub async fn vehicle_history(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>> {
        let request = CheckOutRequest::new(vehicle_reg_number)?;
        self.ledger.history(&request.vehicle_reg_number).await
    }

    /// Free spots per category.
    pub async fn availability(&self) -> DomainResult<Vec<(VehicleCategory, u64)>> {
        let mut free = Vec::with_capacity(VehicleCategory::ALL.len());
        for category in VehicleCategory::ALL {
            free.push((category, self.allocator.availability(category).await?));
        }
        Ok(free)
    }

    /// Registration numbers with a check-in or check-out in flight.
    pub fn vehicles_in_flight(&self) -> usize {
        self.vehicle_locks.len()
    }

    fn vehicle_lock(&self, vehicle_reg_number: &str) -> Arc<Mutex<()>> {
        self.vehicle_locks
            .entry(vehicle_reg_number.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the lock entry once no other operation holds or awaits it.
    fn forget_vehicle_lock(&self, vehicle_reg_number: &str) {
        self.vehicle_locks
            .remove_if(vehicle_reg_number, |_, lock| Arc::strong_count(lock) == 1);
    }
}
