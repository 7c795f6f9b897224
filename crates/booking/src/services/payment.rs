//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::{BookingRequest, Money};
use tokio::sync::RwLock;

use crate::error::BookingError;

/// Result of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// The payment ID assigned by the gateway.
    pub payment_id: String,
}

/// Trait for charging guests.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges `amount` for the booking.
    ///
    /// Fails with `BookingError::PaymentDeclined` when the gateway rejects.
    async fn pay(
        &self,
        request: &BookingRequest,
        amount: Money,
    ) -> Result<PaymentReceipt, BookingError>;

    /// Refunds a previously made payment.
    async fn refund(&self, payment_id: &str) -> Result<(), BookingError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    charges: Vec<(BookingRequest, Money)>,
    payments: HashMap<String, (BookingRequest, Money)>,
    next_id: u32,
    decline: bool,
    delay: Option<Duration>,
}

/// In-memory payment gateway for testing.
///
/// Every `pay` call is recorded, accepted or not.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to decline subsequent charges.
    pub async fn set_decline(&self, decline: bool) {
        self.state.write().await.decline = decline;
    }

    /// Makes every `pay` call wait before answering.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        self.state.write().await.delay = delay;
    }

    /// Returns every charge attempt in call order.
    pub async fn charges(&self) -> Vec<(BookingRequest, Money)> {
        self.state.read().await.charges.clone()
    }

    /// Returns the number of payments that were taken and not refunded.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    /// Returns true if a payment exists with the given ID.
    pub async fn has_payment(&self, payment_id: &str) -> bool {
        self.state.read().await.payments.contains_key(payment_id)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn pay(
        &self,
        request: &BookingRequest,
        amount: Money,
    ) -> Result<PaymentReceipt, BookingError> {
        let delay = self.state.read().await.delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().await;
        state.charges.push((request.clone(), amount));

        if state.decline {
            return Err(BookingError::PaymentDeclined(format!(
                "charge of {amount} rejected"
            )));
        }

        state.next_id += 1;
        let payment_id = format!("PAY-{:04}", state.next_id);
        state
            .payments
            .insert(payment_id.clone(), (request.clone(), amount));

        Ok(PaymentReceipt { payment_id })
    }

    async fn refund(&self, payment_id: &str) -> Result<(), BookingError> {
        let mut state = self.state.write().await;
        state.payments.remove(payment_id);
        Ok(())
    }
}
