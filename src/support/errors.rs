use thiserror::Error;

use crate::domain::VehicleCategory;

/// Coarse error classification surfaced to callers of the parking core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NoCapacity,
    NotFound,
    InvalidState,
    Storage,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No free {category} spot available")]
    NoCapacity { category: VehicleCategory },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NoCapacity { .. } => ErrorKind::NoCapacity,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Message shown to the person at the kiosk. One per error kind.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => format!("Entered input is invalid: {}", msg),
            Self::NoCapacity { category } => format!(
                "Parking slots for {} are full. Please try again later.",
                category
            ),
            Self::NotFound { value, .. } => format!(
                "No parked vehicle found for registration number {}",
                value
            ),
            Self::InvalidState(msg) => format!("Request rejected: {}", msg),
            Self::Storage(_) => {
                "The parking system is temporarily unavailable. Please contact staff.".to_string()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_user_message() {
        let errors = [
            DomainError::InvalidInput("x".into()),
            DomainError::NoCapacity {
                category: VehicleCategory::Car,
            },
            DomainError::NotFound {
                entity: "Ticket",
                field: "vehicle_reg_number",
                value: "ABCDEF".into(),
            },
            DomainError::InvalidState("x".into()),
            DomainError::Storage("x".into()),
        ];

        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.user_message()).collect();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn no_capacity_names_the_category() {
        let err = DomainError::NoCapacity {
            category: VehicleCategory::Bike,
        };
        assert_eq!(err.to_string(), "No free BIKE spot available");
        assert!(err.user_message().contains("BIKE"));
    }

    #[test]
    fn infra_error_maps_to_storage_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: DomainError = InfraError::from(io).into();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("disk gone"));
    }
}
