//! Booking workflow error types.

use std::time::Duration;

use booking_store::StoreError;
use common::{BookingId, RoomId};
use domain::DomainError;
use thiserror::Error;

/// Errors that can occur while making or cancelling a booking.
#[derive(Debug, Error)]
pub enum BookingError {
    /// No available room can hold the requested number of guests.
    #[error("No room available for {guests} guest(s)")]
    NoRoomAvailable { guests: u32 },

    /// The payment gateway rejected the charge.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// No booking is stored under the given ID.
    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    /// The request breaks a business rule.
    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    /// The room is already marked as booked.
    #[error("Room already booked: {0}")]
    RoomAlreadyBooked(RoomId),

    /// The room is not part of the inventory.
    #[error("Unknown room: {0}")]
    UnknownRoom(RoomId),

    /// The booking confirmation could not be delivered.
    #[error("Booking confirmation failed: {0}")]
    NotificationFailed(String),

    /// A collaborator call did not finish in time.
    #[error("Step '{step}' timed out after {timeout:?}")]
    Timeout {
        step: &'static str,
        timeout: Duration,
    },

    /// Booking store error.
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(DomainError),
}

impl BookingError {
    /// Short, stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::NoRoomAvailable { .. } => "no_room_available",
            BookingError::PaymentDeclined(_) => "payment_declined",
            BookingError::BookingNotFound(_) => "booking_not_found",
            BookingError::InvalidRequest(_) => "invalid_request",
            BookingError::RoomAlreadyBooked(_) => "room_already_booked",
            BookingError::UnknownRoom(_) => "unknown_room",
            BookingError::NotificationFailed(_) => "notification_failed",
            BookingError::Timeout { .. } => "timeout",
            BookingError::Store(_) => "store",
            BookingError::Domain(_) => "domain",
        }
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(booking_id) => BookingError::BookingNotFound(booking_id),
            other => BookingError::Store(other),
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidRequest(reason) => BookingError::InvalidRequest(reason),
            other => BookingError::Domain(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_becomes_booking_not_found() {
        let id = BookingId::new();
        let err: BookingError = StoreError::NotFound(id).into();
        assert!(matches!(err, BookingError::BookingNotFound(missing) if missing == id));
    }

    #[test]
    fn test_other_store_errors_are_wrapped() {
        let err: BookingError = StoreError::Rejected("down".to_string()).into();
        assert!(matches!(err, BookingError::Store(_)));
        assert_eq!(err.kind(), "store");
    }

    #[test]
    fn test_invalid_request_is_lifted() {
        let err: BookingError = DomainError::InvalidRequest("bad dates".to_string()).into();
        assert!(matches!(err, BookingError::InvalidRequest(ref reason) if reason == "bad dates"));
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn test_display() {
        let err = BookingError::NoRoomAvailable { guests: 3 };
        assert_eq!(err.to_string(), "No room available for 3 guest(s)");
    }
}
