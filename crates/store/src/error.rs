use common::BookingId;
use thiserror::Error;

/// Errors that can occur when interacting with a booking store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No booking is stored under the given ID.
    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    /// The store refused to persist the booking.
    #[error("Booking could not be saved: {0}")]
    Rejected(String),

    /// A stored row could not be turned back into a booking.
    #[error("Invalid stored booking: {0}")]
    InvalidRecord(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for booking store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
