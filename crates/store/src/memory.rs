use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::BookingId;
use domain::BookingRequest;
use tokio::sync::RwLock;

use crate::{BookingRecord, BookingStore, Result, StoreError};

#[derive(Debug, Default)]
struct InMemoryStoreState {
    records: HashMap<BookingId, BookingRecord>,
    save_calls: Vec<BookingRequest>,
    fail_on_save: bool,
    fail_on_delete: bool,
}

/// In-memory booking store.
///
/// Stores every record in a map and remembers the requests passed to
/// `save`, so tests can assert on what was persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

impl InMemoryBookingStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to reject subsequent `save` calls.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    /// Configures the store to reject subsequent `delete` calls.
    pub async fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().await.fail_on_delete = fail;
    }

    /// Returns the number of stored bookings.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.records.is_empty()
    }

    /// Returns every request passed to `save`, including rejected ones.
    pub async fn save_calls(&self) -> Vec<BookingRequest> {
        self.state.read().await.save_calls.clone()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn save(&self, request: &BookingRequest) -> Result<BookingId> {
        let mut state = self.state.write().await;
        state.save_calls.push(request.clone());

        if state.fail_on_save {
            return Err(StoreError::Rejected("store unavailable".to_string()));
        }

        let record = BookingRecord::new(request.clone());
        let booking_id = record.booking_id;
        state.records.insert(booking_id, record);

        tracing::debug!(%booking_id, "booking saved");
        Ok(booking_id)
    }

    async fn get(&self, booking_id: BookingId) -> Result<BookingRecord> {
        self.state
            .read()
            .await
            .records
            .get(&booking_id)
            .cloned()
            .ok_or(StoreError::NotFound(booking_id))
    }

    async fn delete(&self, booking_id: BookingId) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_delete {
            return Err(StoreError::Rejected("store unavailable".to_string()));
        }
        state
            .records
            .remove(&booking_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(booking_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::RoomId;

    use super::*;
    use crate::BookingStoreExt;

    fn request() -> BookingRequest {
        BookingRequest::builder()
            .user_id("1")
            .date_from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .date_to(NaiveDate::from_ymd_opt(2020, 1, 5).unwrap())
            .guest_count(2)
            .build()
            .unwrap()
            .with_room(RoomId::new("1.3"))
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryBookingStore::new();
        let id = store.save(&request()).await.unwrap();

        let record = store.get(id).await.unwrap();
        assert_eq!(record.booking_id, id);
        assert_eq!(record.request, request());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_generates_fresh_ids() {
        let store = InMemoryBookingStore::new();
        let id1 = store.save(&request()).await.unwrap();
        let id2 = store.save(&request()).await.unwrap();

        assert_ne!(id1, id2);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.save_calls().await.len(), 2);
    }

    #[tokio::test]
    async fn get_missing_booking() {
        let store = InMemoryBookingStore::new();
        let id = BookingId::new();

        let result = store.get(id).await;
        assert!(matches!(result, Err(StoreError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = InMemoryBookingStore::new();
        let id = store.save(&request()).await.unwrap();

        store.delete(id).await.unwrap();
        assert!(store.is_empty().await);
        assert!(!store.exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_missing_booking() {
        let store = InMemoryBookingStore::new();
        let result = store.delete(BookingId::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn fail_on_save_records_the_attempt() {
        let store = InMemoryBookingStore::new();
        store.set_fail_on_save(true).await;

        let result = store.save(&request()).await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));
        assert!(store.is_empty().await);
        assert_eq!(store.save_calls().await, vec![request()]);
    }

    #[tokio::test]
    async fn fail_on_delete_keeps_record() {
        let store = InMemoryBookingStore::new();
        let id = store.save(&request()).await.unwrap();
        store.set_fail_on_delete(true).await;

        assert!(matches!(store.delete(id).await, Err(StoreError::Rejected(_))));
        assert!(store.get(id).await.is_ok());
    }
}
