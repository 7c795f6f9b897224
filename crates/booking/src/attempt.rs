//! Progress of a single booking attempt.

use common::{BookingId, RoomId};
use domain::{BookingState, DomainError};

/// Tracks what a `make_booking` call has done so far.
///
/// The orchestrator advances the attempt after each step and reads the
/// accumulated context (room, payment, record) back when it has to undo the
/// completed steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingAttempt {
    state: BookingState,
    room_id: Option<RoomId>,
    payment_id: Option<String>,
    booking_id: Option<BookingId>,
}

impl BookingAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BookingState {
        self.state
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    pub fn booking_id(&self) -> Option<BookingId> {
        self.booking_id
    }

    pub fn room_reserved(&mut self, room_id: RoomId) -> Result<(), DomainError> {
        self.transition(BookingState::RoomReserved)?;
        self.room_id = Some(room_id);
        Ok(())
    }

    pub fn priced(&mut self) -> Result<(), DomainError> {
        self.transition(BookingState::Priced)
    }

    pub fn payment_authorized(&mut self, payment_id: String) -> Result<(), DomainError> {
        self.transition(BookingState::PaymentAuthorized)?;
        self.payment_id = Some(payment_id);
        Ok(())
    }

    pub fn persisted(&mut self, booking_id: BookingId) -> Result<(), DomainError> {
        self.transition(BookingState::Persisted)?;
        self.booking_id = Some(booking_id);
        Ok(())
    }

    pub fn confirmed(&mut self) -> Result<(), DomainError> {
        self.transition(BookingState::Confirmed)
    }

    pub fn abort(&mut self) -> Result<(), DomainError> {
        self.transition(BookingState::Aborted)
    }

    fn transition(&mut self, next: BookingState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::InvalidStateTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
