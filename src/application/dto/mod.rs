pub mod vehicle;

pub use vehicle::{CheckInRequest, CheckOutRequest};
