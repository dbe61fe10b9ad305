//! Spot store interface

use async_trait::async_trait;

use super::model::ParkingSpot;
use crate::domain::{DomainResult, VehicleCategory};

#[async_trait]
pub trait SpotStore: Send + Sync {
    /// Inserts a spot during facility provisioning.
    async fn save(&self, spot: ParkingSpot) -> DomainResult<()>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>>;
    async fn find_all(&self) -> DomainResult<Vec<ParkingSpot>>;
    /// Lowest-numbered free spot of the given category.
    async fn find_lowest_available(
        &self,
        category: VehicleCategory,
    ) -> DomainResult<Option<ParkingSpot>>;
    async fn count_available(&self, category: VehicleCategory) -> DomainResult<u64>;
    async fn set_availability(&self, id: i32, is_available: bool) -> DomainResult<()>;
}
