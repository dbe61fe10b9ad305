//! Inbound port: where the kiosk operator's answers come from

use async_trait::async_trait;

use crate::domain::{DomainResult, VehicleCategory};

/// Source of the details the core asks for during check-in and check-out.
///
/// Implementations surface unreadable or malformed input as
/// `DomainError::InvalidInput`; the core never retries.
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn read_vehicle_category(&self) -> DomainResult<VehicleCategory>;
    async fn read_vehicle_registration_number(&self) -> DomainResult<String>;
}
