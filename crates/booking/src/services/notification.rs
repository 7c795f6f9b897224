//! Booking confirmation channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::BookingId;
use tokio::sync::RwLock;

use crate::error::BookingError;

/// Trait for sending booking confirmations to guests.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send_booking_confirmation(&self, booking_id: BookingId) -> Result<(), BookingError>;
}

/// Dispatcher that only writes the confirmation to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for LoggingNotificationDispatcher {
    async fn send_booking_confirmation(&self, booking_id: BookingId) -> Result<(), BookingError> {
        tracing::info!(%booking_id, "booking confirmation sent");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    sent: Vec<BookingId>,
    fail_on_send: bool,
    delay: Option<Duration>,
}

/// In-memory dispatcher for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationDispatcher {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

impl InMemoryNotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the dispatcher to fail subsequent sends.
    pub async fn set_fail_on_send(&self, fail: bool) {
        self.state.write().await.fail_on_send = fail;
    }

    /// Makes every send wait before answering.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        self.state.write().await.delay = delay;
    }

    /// Returns the bookings confirmed so far, in order.
    pub async fn sent(&self) -> Vec<BookingId> {
        self.state.read().await.sent.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.state.read().await.sent.len()
    }
}

#[async_trait]
impl NotificationDispatcher for InMemoryNotificationDispatcher {
    async fn send_booking_confirmation(&self, booking_id: BookingId) -> Result<(), BookingError> {
        let delay = self.state.read().await.delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().await;
        if state.fail_on_send {
            return Err(BookingError::NotificationFailed(
                "mail server not ready".to_string(),
            ));
        }
        state.sent.push(booking_id);
        Ok(())
    }
}
