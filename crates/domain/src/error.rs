//! Domain error types.

use thiserror::Error;

use crate::booking::BookingState;

/// Errors raised by the booking domain model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The request violates a business rule (date ordering, guest count, user id).
    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    /// A required field was not supplied to the request builder.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A persisted booking carries no room assignment.
    #[error("Booking has no room assigned")]
    RoomNotAssigned,

    /// An attempt tried to move between two states that are not connected.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: BookingState, to: BookingState },
}
