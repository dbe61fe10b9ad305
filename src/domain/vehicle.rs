//! Vehicle category value object

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::support::errors::DomainError;

/// Kind of vehicle a parking spot is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleCategory {
    Car,
    Bike,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 2] = [VehicleCategory::Car, VehicleCategory::Bike];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Bike => "BIKE",
        }
    }

    /// Kiosk menu selection: 1 = car, 2 = bike.
    pub fn from_selection(selection: u32) -> Result<Self, DomainError> {
        match selection {
            1 => Ok(Self::Car),
            2 => Ok(Self::Bike),
            other => Err(DomainError::InvalidInput(format!(
                "unknown vehicle type selection {}",
                other
            ))),
        }
    }
}

impl FromStr for VehicleCategory {
    type Err = DomainError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CAR" => Ok(Self::Car),
            "BIKE" => Ok(Self::Bike),
            other => Err(DomainError::InvalidInput(format!(
                "unknown vehicle category '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
