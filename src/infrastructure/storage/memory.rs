//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    provision_layout, DomainError, DomainResult, ParkingSpot, RepositoryProvider, SpotStore,
    Ticket, TicketStore, VehicleCategory,
};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    spots: DashMap<i32, ParkingSpot>,
    tickets: DashMap<i32, Ticket>,
    ticket_counter: AtomicI32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            spots: DashMap::new(),
            tickets: DashMap::new(),
            ticket_counter: AtomicI32::new(1),
        }
    }

    /// Storage pre-provisioned with `car_spots` car spots followed by
    /// `bike_spots` bike spots.
    pub fn with_layout(car_spots: u32, bike_spots: u32) -> Self {
        let storage = Self::new();
        for spot in provision_layout(car_spots, bike_spots) {
            storage.spots.insert(spot.id, spot);
        }
        storage
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn ticket_not_found(id: i32) -> DomainError {
    DomainError::NotFound {
        entity: "Ticket",
        field: "id",
        value: id.to_string(),
    }
}

#[async_trait]
impl SpotStore for InMemoryStorage {
    async fn save(&self, spot: ParkingSpot) -> DomainResult<()> {
        if self.spots.contains_key(&spot.id) {
            return Err(DomainError::InvalidState(format!(
                "spot {} already exists",
                spot.id
            )));
        }
        self.spots.insert(spot.id, spot);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>> {
        Ok(self.spots.get(&id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingSpot>> {
        let mut spots: Vec<ParkingSpot> = self.spots.iter().map(|s| s.value().clone()).collect();
        spots.sort_by_key(|s| s.id);
        Ok(spots)
    }

    async fn find_lowest_available(
        &self,
        category: VehicleCategory,
    ) -> DomainResult<Option<ParkingSpot>> {
        Ok(self
            .spots
            .iter()
            .filter(|s| s.category == category && s.is_available)
            .min_by_key(|s| s.id)
            .map(|s| s.clone()))
    }

    async fn count_available(&self, category: VehicleCategory) -> DomainResult<u64> {
        Ok(self
            .spots
            .iter()
            .filter(|s| s.category == category && s.is_available)
            .count() as u64)
    }

    async fn set_availability(&self, id: i32, is_available: bool) -> DomainResult<()> {
        if let Some(mut spot) = self.spots.get_mut(&id) {
            spot.is_available = is_available;
            Ok(())
        } else {
            Err(DomainError::NotFound {
                entity: "ParkingSpot",
                field: "id",
                value: id.to_string(),
            })
        }
    }
}

#[async_trait]
impl TicketStore for InMemoryStorage {
    async fn insert(&self, mut ticket: Ticket) -> DomainResult<Ticket> {
        ticket.id = self.ticket_counter.fetch_add(1, Ordering::SeqCst);
        self.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>> {
        Ok(self.tickets.get(&id).map(|t| t.clone()))
    }

    async fn update(&self, ticket: Ticket) -> DomainResult<()> {
        if !self.tickets.contains_key(&ticket.id) {
            return Err(ticket_not_found(ticket.id));
        }
        self.tickets.insert(ticket.id, ticket);
        Ok(())
    }

    async fn find_open_for_vehicle(
        &self,
        vehicle_reg_number: &str,
    ) -> DomainResult<Option<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .find(|t| t.vehicle_reg_number == vehicle_reg_number && t.is_open())
            .map(|t| t.clone()))
    }

    async fn find_latest_for_vehicle(
        &self,
        vehicle_reg_number: &str,
    ) -> DomainResult<Option<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .max_by_key(|t| (t.in_time, t.id))
            .map(|t| t.clone()))
    }

    async fn find_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .map(|t| t.clone())
            .collect();
        tickets.sort_by(|a, b| (b.in_time, b.id).cmp(&(a.in_time, a.id)));
        Ok(tickets)
    }

    async fn count_for_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<u64> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .count() as u64)
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn spots(&self) -> &dyn SpotStore {
        self
    }

    fn tickets(&self) -> &dyn TicketStore {
        self
    }
}
