//! Spot allocation over the spot store

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{
    provision_layout, DomainResult, ParkingSpot, RepositoryProvider, VehicleCategory,
};
use crate::support::errors::DomainError;

/// Finds free spots and flips their availability.
///
/// The "lowest free spot" lookup and the occupy that follows it are a
/// read-then-write on the store; [`SpotAllocator::allocate`] serialises them
/// per category so two kiosks in the same process never get the same spot.
pub struct SpotAllocator {
    repos: Arc<dyn RepositoryProvider>,
    category_locks: HashMap<VehicleCategory, Mutex<()>>,
}

impl SpotAllocator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let category_locks = VehicleCategory::ALL
            .iter()
            .map(|c| (*c, Mutex::new(())))
            .collect();
        Self {
            repos,
            category_locks,
        }
    }

    /// Lowest-numbered free spot of `category`, left untouched.
    pub async fn next_available_spot(&self, category: VehicleCategory) -> DomainResult<ParkingSpot> {
        self.repos
            .spots()
            .find_lowest_available(category)
            .await?
            .ok_or(DomainError::NoCapacity { category })
    }

    pub async fn occupy(&self, spot_id: i32) -> DomainResult<ParkingSpot> {
        let mut spot = self.load(spot_id).await?;
        if !spot.is_available {
            return Err(DomainError::InvalidState(format!(
                "spot {} is already occupied",
                spot_id
            )));
        }
        self.repos.spots().set_availability(spot_id, false).await?;
        spot.is_available = false;
        debug!(spot_id, "Spot occupied");
        Ok(spot)
    }

    pub async fn release(&self, spot_id: i32) -> DomainResult<ParkingSpot> {
        let mut spot = self.load(spot_id).await?;
        if spot.is_available {
            return Err(DomainError::InvalidState(format!(
                "spot {} is already free",
                spot_id
            )));
        }
        self.repos.spots().set_availability(spot_id, true).await?;
        spot.is_available = true;
        debug!(spot_id, "Spot released");
        Ok(spot)
    }

    /// Picks the lowest free spot of `category` and occupies it atomically
    /// with respect to other allocations of the same category.
    pub async fn allocate(&self, category: VehicleCategory) -> DomainResult<ParkingSpot> {
        let _guard = match self.category_locks.get(&category) {
            Some(lock) => lock.lock().await,
            None => {
                return Err(DomainError::InvalidInput(format!(
                    "no allocation lock for category {}",
                    category
                )))
            }
        };
        let spot = self.next_available_spot(category).await?;
        self.occupy(spot.id).await
    }

    pub async fn availability(&self, category: VehicleCategory) -> DomainResult<u64> {
        self.repos.spots().count_available(category).await
    }

    /// Seeds an empty spot table with the configured layout. Returns the
    /// number of spots created; an already provisioned facility is left as is.
    pub async fn provision(&self, car_spots: u32, bike_spots: u32) -> DomainResult<usize> {
        let existing = self.repos.spots().find_all().await?;
        if !existing.is_empty() {
            debug!(spots = existing.len(), "Facility already provisioned");
            return Ok(0);
        }

        let layout = provision_layout(car_spots, bike_spots);
        let created = layout.len();
        for spot in layout {
            self.repos.spots().save(spot).await?;
        }
        info!(car_spots, bike_spots, "Facility provisioned");
        Ok(created)
    }

    async fn load(&self, spot_id: i32) -> DomainResult<ParkingSpot> {
        self.repos
            .spots()
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "ParkingSpot",
                field: "id",
                value: spot_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn allocator(cars: u32, bikes: u32) -> SpotAllocator {
        SpotAllocator::new(Arc::new(InMemoryStorage::with_layout(cars, bikes)))
    }

    #[tokio::test]
    async fn next_available_is_lowest_of_category() {
        let alloc = allocator(3, 2);
        assert_eq!(alloc.next_available_spot(VehicleCategory::Car).await.unwrap().id, 1);
        assert_eq!(alloc.next_available_spot(VehicleCategory::Bike).await.unwrap().id, 4);
    }

    #[tokio::test]
    async fn no_capacity_when_category_full() {
        let alloc = allocator(1, 1);
        alloc.occupy(1).await.unwrap();
        let err = alloc.next_available_spot(VehicleCategory::Car).await.unwrap_err();
        assert!(matches!(err, DomainError::NoCapacity { .. }));
        // bikes are unaffected
        assert_eq!(alloc.next_available_spot(VehicleCategory::Bike).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn double_occupy_is_invalid_state() {
        let alloc = allocator(2, 0);
        alloc.occupy(1).await.unwrap();
        let err = alloc.occupy(1).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn release_free_spot_is_invalid_state() {
        let alloc = allocator(2, 0);
        let err = alloc.release(2).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn unknown_spot_is_not_found() {
        let alloc = allocator(1, 0);
        assert!(matches!(
            alloc.occupy(9).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn occupy_then_release_restores_availability() {
        let alloc = allocator(2, 0);
        let spot = alloc.allocate(VehicleCategory::Car).await.unwrap();
        assert_eq!(spot.id, 1);
        assert!(!spot.is_available);
        assert_eq!(alloc.availability(VehicleCategory::Car).await.unwrap(), 1);

        let spot = alloc.release(spot.id).await.unwrap();
        assert!(spot.is_available);
        assert_eq!(alloc.availability(VehicleCategory::Car).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn concurrent_allocations_get_distinct_spots() {
        let alloc = Arc::new(allocator(5, 0));
        let mut handles = Vec::new();
        for _ in 0..5 {
            let alloc = alloc.clone();
            handles.push(tokio::spawn(async move {
                alloc.allocate(VehicleCategory::Car).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let err = alloc.allocate(VehicleCategory::Car).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NoCapacity {
                category: VehicleCategory::Car
            }
        ));
    }

    #[tokio::test]
    async fn provision_only_seeds_empty_facility() {
        let alloc = SpotAllocator::new(Arc::new(InMemoryStorage::new()));
        assert_eq!(alloc.provision(3, 2).await.unwrap(), 5);
        assert_eq!(alloc.provision(3, 2).await.unwrap(), 0);
        assert_eq!(alloc.availability(VehicleCategory::Bike).await.unwrap(), 2);
    }
}
