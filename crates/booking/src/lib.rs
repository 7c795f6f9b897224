//! Booking orchestration for the hotel.
//!
//! This crate sequences the collaborators involved in reserving a room:
//! 1. Reserve a room (atomic resolve-and-book)
//! 2. Price the stay
//! 3. Charge the guest (prepaid bookings only)
//! 4. Persist the booking record
//! 5. Send the confirmation
//!
//! If a step fails, the completed steps are compensated in reverse order.
//! A failed confirmation is only logged unless the orchestrator is configured
//! with [`NotificationPolicy::Required`].

pub mod attempt;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod steps;

pub use attempt::BookingAttempt;
pub use config::{BookingConfig, NotificationPolicy};
pub use error::BookingError;
pub use orchestrator::BookingOrchestrator;
pub use services::{
    AvailabilityResolver, InMemoryAvailabilityResolver, InMemoryNotificationDispatcher,
    InMemoryPaymentGateway, LoggingNotificationDispatcher, NotificationDispatcher, PaymentGateway,
    PaymentReceipt,
};
