//! Booking orchestrator sequencing inventory, payment, persistence and
//! notification.

use std::time::Instant;

use booking_store::{BookingRecord, BookingStore};
use common::BookingId;
use domain::{BookingRequest, DomainError, Money, PricingCalculator, Room};

use crate::attempt::BookingAttempt;
use crate::config::{BookingConfig, NotificationPolicy};
use crate::error::BookingError;
use crate::services::availability::AvailabilityResolver;
use crate::services::notification::NotificationDispatcher;
use crate::services::payment::{PaymentGateway, PaymentReceipt};
use crate::steps;

/// Orchestrates the booking workflow.
///
/// `make_booking` runs: reserve room → price → charge (prepaid only) →
/// persist → confirm. When a step fails, the completed steps are undone in
/// reverse order before the error is returned.
pub struct BookingOrchestrator<A, P, S, N>
where
    A: AvailabilityResolver,
    P: PaymentGateway,
    S: BookingStore,
    N: NotificationDispatcher,
{
    availability: A,
    payment: P,
    store: S,
    notifier: N,
    pricing: PricingCalculator,
    config: BookingConfig,
}

impl<A, P, S, N> BookingOrchestrator<A, P, S, N>
where
    A: AvailabilityResolver,
    P: PaymentGateway,
    S: BookingStore,
    N: NotificationDispatcher,
{
    /// Creates a new orchestrator with the default configuration.
    pub fn new(availability: A, payment: P, store: S, notifier: N, pricing: PricingCalculator) -> Self {
        Self {
            availability,
            payment,
            store,
            notifier,
            pricing,
            config: BookingConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: BookingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Books a room for the request and returns the new booking's ID.
    ///
    /// The caller's request is never modified; the persisted record carries a
    /// copy with the assigned room.
    #[tracing::instrument(
        skip(self, request),
        fields(user_id = %request.user_id(), guests = request.guest_count(), prepaid = request.is_prepaid())
    )]
    pub async fn make_booking(&self, request: &BookingRequest) -> Result<BookingId, BookingError> {
        metrics::counter!("bookings_total").increment(1);
        let started = Instant::now();

        let result = self.run_booking(request).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("booking_duration_seconds").record(duration);
        match &result {
            Ok(booking_id) => {
                metrics::counter!("bookings_completed").increment(1);
                tracing::info!(%booking_id, duration, "booking completed");
            }
            Err(e) => {
                metrics::counter!("bookings_failed", "reason" => e.kind()).increment(1);
                tracing::warn!(error = %e, duration, "booking failed");
            }
        }
        result
    }

    async fn run_booking(&self, request: &BookingRequest) -> Result<BookingId, BookingError> {
        request.validate()?;
        let mut attempt = BookingAttempt::new();

        // 1. Resolve and reserve a room in one step
        let room_id = self.availability.reserve_room(request).await?;
        tracing::info!(step = steps::RESERVE_ROOM, %room_id, "room reserved");
        attempt.room_reserved(room_id.clone())?;

        // 2. Price the stay
        let price = match self.pricing.calculate_price(request) {
            Ok(price) => price,
            Err(e) => return Err(self.abort(&mut attempt, steps::PRICE_STAY, e.into()).await),
        };
        attempt.priced()?;

        // 3. Charge prepaid stays
        if request.is_prepaid() {
            match self.charge(request, price).await {
                Ok(receipt) => {
                    tracing::info!(
                        step = steps::PROCESS_PAYMENT,
                        payment_id = %receipt.payment_id,
                        %price,
                        "payment authorized"
                    );
                    attempt.payment_authorized(receipt.payment_id)?;
                }
                Err(e) => return Err(self.abort(&mut attempt, steps::PROCESS_PAYMENT, e).await),
            }
        }

        // 4. Persist a copy of the request carrying the room
        let booking_id = match self.store.save(&request.with_room(room_id)).await {
            Ok(booking_id) => booking_id,
            Err(e) => {
                return Err(self
                    .abort(&mut attempt, steps::PERSIST_BOOKING, e.into())
                    .await);
            }
        };
        tracing::info!(step = steps::PERSIST_BOOKING, %booking_id, "booking persisted");
        attempt.persisted(booking_id)?;

        // 5. Confirm
        if let Err(e) = self.notify(booking_id).await {
            match self.config.notification_policy {
                NotificationPolicy::BestEffort => {
                    metrics::counter!("booking_notifications_failed").increment(1);
                    tracing::warn!(%booking_id, error = %e, "booking confirmation not delivered");
                }
                NotificationPolicy::Required => {
                    return Err(self.abort(&mut attempt, steps::SEND_CONFIRMATION, e).await);
                }
            }
        }
        attempt.confirmed()?;

        Ok(booking_id)
    }

    async fn charge(
        &self,
        request: &BookingRequest,
        price: Money,
    ) -> Result<PaymentReceipt, BookingError> {
        let timeout = self.config.payment_timeout;
        // A charge that times out has no receipt, so it cannot be refunded here.
        tokio::time::timeout(timeout, self.payment.pay(request, price))
            .await
            .map_err(|_| BookingError::Timeout {
                step: steps::PROCESS_PAYMENT,
                timeout,
            })?
    }

    async fn notify(&self, booking_id: BookingId) -> Result<(), BookingError> {
        let timeout = self.config.notification_timeout;
        tokio::time::timeout(timeout, self.notifier.send_booking_confirmation(booking_id))
            .await
            .map_err(|_| BookingError::Timeout {
                step: steps::SEND_CONFIRMATION,
                timeout,
            })?
    }

    /// Undoes the completed steps and returns the original error.
    async fn abort(
        &self,
        attempt: &mut BookingAttempt,
        failed_step: &'static str,
        error: BookingError,
    ) -> BookingError {
        tracing::warn!(step = failed_step, state = %attempt.state(), error = %error, "booking step failed, compensating");
        self.compensate(attempt).await;

        if let Err(e) = attempt.abort() {
            tracing::error!(error = %e, "booking attempt could not be marked aborted");
        }
        error
    }

    /// Runs compensating actions in reverse order of completed steps.
    ///
    /// A failing compensation is logged and skipped so the remaining ones
    /// still run.
    #[tracing::instrument(skip(self, attempt), fields(state = %attempt.state()))]
    async fn compensate(&self, attempt: &BookingAttempt) {
        if let Some(booking_id) = attempt.booking_id() {
            metrics::counter!("booking_compensations_total", "step" => steps::PERSIST_BOOKING)
                .increment(1);
            if let Err(e) = self.store.delete(booking_id).await {
                tracing::warn!(%booking_id, error = %e, "failed to delete booking record");
            }
        }

        if let Some(payment_id) = attempt.payment_id() {
            metrics::counter!("booking_compensations_total", "step" => steps::PROCESS_PAYMENT)
                .increment(1);
            if let Err(e) = self.payment.refund(payment_id).await {
                tracing::warn!(%payment_id, error = %e, "failed to refund payment");
            }
        }

        if let Some(room_id) = attempt.room_id() {
            metrics::counter!("booking_compensations_total", "step" => steps::RESERVE_ROOM)
                .increment(1);
            if let Err(e) = self.availability.unbook_room(room_id).await {
                tracing::warn!(%room_id, error = %e, "failed to release room");
            }
        }
    }

    /// Cancels a booking: releases its room and deletes the record.
    ///
    /// If the record cannot be deleted after the room was released, the room
    /// is booked again so record and inventory stay consistent.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_booking(&self, booking_id: BookingId) -> Result<(), BookingError> {
        let record = self.store.get(booking_id).await?;
        let room_id = record
            .request
            .room_id()
            .cloned()
            .ok_or(DomainError::RoomNotAssigned)?;

        self.availability.unbook_room(&room_id).await?;

        if let Err(e) = self.store.delete(booking_id).await {
            tracing::warn!(%booking_id, %room_id, error = %e, "failed to delete booking, restoring room");
            if let Err(rebook) = self.availability.book_room(&room_id).await {
                tracing::error!(%room_id, error = %rebook, "failed to restore room after cancel");
            }
            return Err(e.into());
        }

        metrics::counter!("bookings_cancelled").increment(1);
        tracing::info!(%room_id, "booking cancelled");
        Ok(())
    }

    /// Loads a stored booking.
    pub async fn get_booking(&self, booking_id: BookingId) -> Result<BookingRecord, BookingError> {
        Ok(self.store.get(booking_id).await?)
    }

    /// Price of the stay in USD.
    pub fn calculate_price(&self, request: &BookingRequest) -> Result<Money, BookingError> {
        Ok(self.pricing.calculate_price(request)?)
    }

    /// Price of the stay in EUR.
    pub fn calculate_price_euro(&self, request: &BookingRequest) -> Result<Money, BookingError> {
        Ok(self.pricing.calculate_price_euro(request)?)
    }

    /// Rooms that are free right now.
    pub async fn get_available_rooms(&self) -> Result<Vec<Room>, BookingError> {
        self.availability.get_available_rooms().await
    }

    /// Total number of guests the currently available rooms can hold.
    pub async fn get_available_place_count(&self) -> Result<u32, BookingError> {
        Ok(self
            .availability
            .get_available_rooms()
            .await?
            .iter()
            .fold(0u32, |total, room| total.saturating_add(room.capacity)))
    }
}
