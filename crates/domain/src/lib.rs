//! Domain layer for the hotel booking system.
//!
//! This crate provides the core booking abstractions:
//! - `BookingRequest` immutable value with builder and validation
//! - `Room` and `Money` value objects
//! - `PricingCalculator` with an injected `CurrencyConverter`
//! - `BookingState` state machine for a single booking attempt

pub mod booking;
pub mod error;
pub mod pricing;

pub use booking::{BookingRequest, BookingRequestBuilder, BookingState, Money, Room};
pub use error::DomainError;
pub use pricing::{BASE_PRICE, CurrencyConverter, FixedRateConverter, PricingCalculator};
