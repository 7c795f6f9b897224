//! HTTP handlers grouped by resource.

pub mod bookings;
pub mod rooms;
pub mod system;

pub use bookings::AppState;
