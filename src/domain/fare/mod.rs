//! Fare aggregate
//!
//! Rate table and the pure fare calculator.

pub mod calculator;
pub mod model;

pub use calculator::FareCalculator;
pub use model::{format_price, FareRates};
