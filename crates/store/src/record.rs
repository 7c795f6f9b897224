use chrono::{DateTime, Utc};
use common::BookingId;
use domain::BookingRequest;
use serde::{Deserialize, Serialize};

/// A persisted booking: a snapshot of the request taken at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: BookingId,
    pub request: BookingRequest,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Creates a record with a freshly generated ID.
    pub fn new(request: BookingRequest) -> Self {
        Self {
            booking_id: BookingId::new(),
            request,
            created_at: Utc::now(),
        }
    }
}
