//! Collaborator traits and in-memory implementations for booking steps.

pub mod availability;
pub mod notification;
pub mod payment;

pub use availability::{AvailabilityResolver, InMemoryAvailabilityResolver};
pub use notification::{
    InMemoryNotificationDispatcher, LoggingNotificationDispatcher, NotificationDispatcher,
};
pub use payment::{InMemoryPaymentGateway, PaymentGateway, PaymentReceipt};
