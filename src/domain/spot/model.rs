//! Parking spot domain entity

use serde::{Deserialize, Serialize};

use crate::domain::VehicleCategory;

/// A single physical parking location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpot {
    /// Spot number, unique within the facility
    pub id: i32,
    /// Category the spot is built for (fixed once provisioned)
    pub category: VehicleCategory,
    /// Whether the spot is currently free
    pub is_available: bool,
}

impl ParkingSpot {
    pub fn new(id: i32, category: VehicleCategory) -> Self {
        Self {
            id,
            category,
            is_available: true,
        }
    }
}

/// Builds the spot table for a facility: car spots first, then bike spots,
/// numbered from 1.
pub fn provision_layout(car_spots: u32, bike_spots: u32) -> Vec<ParkingSpot> {
    let cars = std::iter::repeat(VehicleCategory::Car).take(car_spots as usize);
    let bikes = std::iter::repeat(VehicleCategory::Bike).take(bike_spots as usize);
    cars.chain(bikes)
        .enumerate()
        .map(|(i, category)| ParkingSpot::new(i as i32 + 1, category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_spot_is_available() {
        let spot = ParkingSpot::new(4, VehicleCategory::Bike);
        assert!(spot.is_available);
        assert_eq!(spot.category, VehicleCategory::Bike);
    }

    #[test]
    fn layout_numbers_cars_before_bikes() {
        let layout = provision_layout(3, 2);
        let ids: Vec<i32> = layout.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(layout[..3].iter().all(|s| s.category == VehicleCategory::Car));
        assert!(layout[3..].iter().all(|s| s.category == VehicleCategory::Bike));
    }

    #[test]
    fn empty_layout() {
        assert!(provision_layout(0, 0).is_empty());
    }
}
