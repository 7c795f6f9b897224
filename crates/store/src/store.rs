use async_trait::async_trait;
use common::BookingId;
use domain::BookingRequest;

use crate::{BookingRecord, Result};

/// Core trait for booking persistence.
///
/// A store owns the mapping from booking ID to record. All implementations
/// must be thread-safe (Send + Sync).
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persists a snapshot of the request and returns a freshly generated ID.
    async fn save(&self, request: &BookingRequest) -> Result<BookingId>;

    /// Loads a booking.
    ///
    /// Fails with `StoreError::NotFound` when the ID is unknown.
    async fn get(&self, booking_id: BookingId) -> Result<BookingRecord>;

    /// Removes a booking.
    ///
    /// Fails with `StoreError::NotFound` when the ID is unknown.
    async fn delete(&self, booking_id: BookingId) -> Result<()>;
}

/// Extension trait providing convenience methods for booking stores.
#[async_trait]
pub trait BookingStoreExt: BookingStore {
    /// Checks if a booking exists.
    async fn exists(&self, booking_id: BookingId) -> Result<bool> {
        match self.get(booking_id).await {
            Ok(_) => Ok(true),
            Err(crate::StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// Blanket implementation for all BookingStore implementations
impl<T: BookingStore + ?Sized> BookingStoreExt for T {}
