//! Booking attempt state machine.

use serde::{Deserialize, Serialize};

/// The state of a single `make_booking` attempt.
///
/// State transitions:
/// ```text
/// Draft ──► RoomReserved ──► Priced ──┬──► PaymentAuthorized ──┬──► Persisted ──► Confirmed
///                                     └────────────────────────┘
///
/// any non-terminal state ──► Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingState {
    /// Request received, nothing attempted yet.
    #[default]
    Draft,

    /// A room was resolved and reserved in the inventory.
    RoomReserved,

    /// The stay has been priced.
    Priced,

    /// The prepayment was charged.
    PaymentAuthorized,

    /// The booking record was persisted.
    Persisted,

    /// Confirmation step finished (terminal state).
    Confirmed,

    /// A step failed and compensation ran (terminal state).
    Aborted,
}

impl BookingState {
    /// Returns true if the attempt may move from `self` to `next`.
    pub fn can_transition_to(&self, next: BookingState) -> bool {
        use BookingState::*;

        match (self, next) {
            (Draft, RoomReserved)
            | (RoomReserved, Priced)
            | (Priced, PaymentAuthorized)
            | (Priced, Persisted)
            | (PaymentAuthorized, Persisted)
            | (Persisted, Confirmed) => true,
            (state, Aborted) => !state.is_terminal(),
            _ => false,
        }
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingState::Confirmed | BookingState::Aborted)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::Draft => "Draft",
            BookingState::RoomReserved => "RoomReserved",
            BookingState::Priced => "Priced",
            BookingState::PaymentAuthorized => "PaymentAuthorized",
            BookingState::Persisted => "Persisted",
            BookingState::Confirmed => "Confirmed",
            BookingState::Aborted => "Aborted",
        }
    }
}

impl std::fmt::Display for BookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_draft() {
        assert_eq!(BookingState::default(), BookingState::Draft);
    }

    #[test]
    fn test_happy_path_transitions() {
        use BookingState::*;

        let prepaid = [Draft, RoomReserved, Priced, PaymentAuthorized, Persisted, Confirmed];
        for pair in prepaid.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }

        assert!(Priced.can_transition_to(Persisted));
    }

    #[test]
    fn test_skipping_steps_is_rejected() {
        use BookingState::*;

        assert!(!Draft.can_transition_to(Priced));
        assert!(!RoomReserved.can_transition_to(Persisted));
        assert!(!Persisted.can_transition_to(PaymentAuthorized));
        assert!(!Draft.can_transition_to(Confirmed));
    }

    #[test]
    fn test_abort_only_from_non_terminal_states() {
        use BookingState::*;

        for state in [Draft, RoomReserved, Priced, PaymentAuthorized, Persisted] {
            assert!(state.can_transition_to(Aborted));
        }
        assert!(!Confirmed.can_transition_to(Aborted));
        assert!(!Aborted.can_transition_to(Aborted));
    }

    #[test]
    fn test_terminal_states() {
        assert!(BookingState::Confirmed.is_terminal());
        assert!(BookingState::Aborted.is_terminal());
        assert!(!BookingState::Persisted.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(BookingState::RoomReserved.to_string(), "RoomReserved");
        assert_eq!(BookingState::PaymentAuthorized.to_string(), "PaymentAuthorized");
    }

    #[test]
    fn test_serialization() {
        let state = BookingState::Persisted;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: BookingState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
