//! Ticket store interface

use async_trait::async_trait;

use super::model::Ticket;
use crate::domain::DomainResult;

#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Persists a new ticket and returns it with its assigned id.
    async fn insert(&self, ticket: Ticket) -> DomainResult<Ticket>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>>;
    async fn update(&self, ticket: Ticket) -> DomainResult<()>;
    async fn find_open_for_vehicle(&self, vehicle_reg_number: &str)
        -> DomainResult<Option<Ticket>>;
    /// Most recent ticket by check-in time.
    async fn find_latest_for_vehicle(
        &self,
        vehicle_reg_number: &str,
    ) -> DomainResult<Option<Ticket>>;
    /// All tickets of a vehicle, newest first.
    async fn find_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>>;
    async fn count_for_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<u64>;
}
