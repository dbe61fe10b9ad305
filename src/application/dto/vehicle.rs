//! Vehicle request DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{DomainError, DomainResult, VehicleCategory};

/// Vehicle arriving at the entry kiosk
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckInRequest {
    pub category: VehicleCategory,
    #[validate(length(min = 1, max = 10, message = "registration number must be 1–10 characters"))]
    pub vehicle_reg_number: String,
}

/// Vehicle leaving through the exit kiosk
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckOutRequest {
    #[validate(length(min = 1, max = 10, message = "registration number must be 1–10 characters"))]
    pub vehicle_reg_number: String,
}

impl CheckInRequest {
    /// Trims the registration number and validates the request.
    pub fn new(category: VehicleCategory, vehicle_reg_number: &str) -> DomainResult<Self> {
        let request = Self {
            category,
            vehicle_reg_number: vehicle_reg_number.trim().to_string(),
        };
        request.validate().map_err(invalid_input)?;
        Ok(request)
    }
}

impl CheckOutRequest {
    pub fn new(vehicle_reg_number: &str) -> DomainResult<Self> {
        let request = Self {
            vehicle_reg_number: vehicle_reg_number.trim().to_string(),
        };
        request.validate().map_err(invalid_input)?;
        Ok(request)
    }
}

fn invalid_input(errors: validator::ValidationErrors) -> DomainError {
    DomainError::InvalidInput(errors.to_string())
}
